//! 로딩 표시

use leptos::prelude::*;

#[component]
pub fn Loading(#[prop(optional)] label: Option<&'static str>) -> impl IntoView {
    view! {
        <div class="loading">
            <div class="spinner" />
            <p class="loading-text">{label.unwrap_or("로딩 중...")}</p>
        </div>
    }
}
