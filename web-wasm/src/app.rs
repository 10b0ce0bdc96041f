//! 메인 애플리케이션 컴포넌트 (라우팅)

use crate::config::ApiConfig;
use crate::pages::{crop::CropPage, entry::EntryPage, farm::FarmPage, statistics::StatisticsPage};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes, A};
use leptos_router::path;
use smartfarm_common::encyclopedia::EntryKind;

#[component]
pub fn App() -> impl IntoView {
    let config = ApiConfig::default();
    log::info!("API 서버: {}", config.base_url);
    provide_context(config);

    view! {
        <Router>
            <nav class="top-nav">
                <A href="/farm/1">"농장"</A>
                <A href="/encyclopedia/strawberry">"작물 도감"</A>
                <A href="/statistics">"시세 통계"</A>
            </nav>
            <Routes fallback=|| view! { <p class="not-found">"페이지를 찾을 수 없습니다."</p> }>
                <Route path=path!("/farm/:farm_id") view=FarmPage />
                <Route path=path!("/encyclopedia/disease/:id") view=|| view! { <EntryPage kind=EntryKind::Disease /> } />
                <Route path=path!("/encyclopedia/insect/:id") view=|| view! { <EntryPage kind=EntryKind::Insect /> } />
                <Route path=path!("/encyclopedia/enemy/:id") view=|| view! { <EntryPage kind=EntryKind::Enemy /> } />
                <Route path=path!("/encyclopedia/:crop") view=CropPage />
                <Route path=path!("/statistics") view=StatisticsPage />
            </Routes>
        </Router>
    }
}
