//! 농장 헤더

use leptos::prelude::*;
use smartfarm_common::types::Farm;

#[component]
pub fn FarmHeader(#[prop(into)] farm: Signal<Option<Farm>>) -> impl IntoView {
    view! {
        <header class="farm-header">
            {move || match farm.get() {
                Some(farm) => view! {
                    <h1>{format!("{}농장", farm.name)}</h1>
                    <p class="farm-location">
                        {format!("위치: {}", farm.location.unwrap_or_default())}
                    </p>
                }
                .into_any(),
                None => view! { <h1>"농장 정보를 불러오는 중..."</h1> }.into_any(),
            }}
        </header>
    }
}
