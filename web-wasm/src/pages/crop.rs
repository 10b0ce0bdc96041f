//! 작물 도감 (`/encyclopedia/:crop`)

use crate::api::encyclopedia::fetch_crop_detail;
use crate::components::loading::Loading;
use crate::config::use_api_config;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;
use smartfarm_common::encyclopedia::{crop_image, crop_name_kor, CardItem, CropDetail};

#[component]
pub fn CropPage() -> impl IntoView {
    let params = use_params_map();
    let crop = Memo::new(move |_| params.with(|p| p.get("crop").map(|s| s.to_string()).unwrap_or_default()));
    let config = use_api_config();

    let detail = RwSignal::new(None::<CropDetail>);
    let error = RwSignal::new(None::<String>);

    Effect::new(move |_| {
        let crop = crop.get();
        detail.set(None);
        error.set(None);
        let config = config.clone();
        spawn_local(async move {
            match fetch_crop_detail(&config, &crop).await {
                Ok(data) => detail.set(Some(data)),
                Err(e) => error.set(Some(e)),
            }
        });
    });

    view! {
        <div class="encyclopedia">
            <a href="/encyclopedia/strawberry" class="back-link">"← 도감으로 돌아가기"</a>
            <div class="crop-hero">
                {move || crop_image(&crop.get()).map(|src| view! { <img src=src alt=crop.get() /> })}
                <h1>{move || crop_name_kor(&crop.get()).to_string()}</h1>
            </div>
            {move || {
                if let Some(message) = error.get() {
                    return view! { <p class="error-text">{message}</p> }.into_any();
                }
                match detail.get() {
                    None => view! { <Loading label="로딩 중..." /> }.into_any(),
                    Some(detail) => view! { <CropDetailView detail=detail /> }.into_any(),
                }
            }}
        </div>
    }
}

#[component]
fn CropDetailView(detail: CropDetail) -> impl IntoView {
    let info_rows = detail
        .info
        .rows()
        .into_iter()
        .map(|(label, value)| view! {
            <div class="info-row">
                <span class="info-label">{label}</span>
                <span class="info-value">{value}</span>
            </div>
        })
        .collect_view();

    let sections = detail
        .sections()
        .into_iter()
        .map(|(title, cards, empty)| view! {
            <section class="card-section">
                <h2>{title}</h2>
                {if cards.is_empty() {
                    view! { <p class="empty-text">{empty}</p> }.into_any()
                } else {
                    view! {
                        <div class="card-grid">
                            {cards.into_iter().map(|card| view! { <EntryCard card=card /> }).collect_view()}
                        </div>
                    }
                    .into_any()
                }}
            </section>
        })
        .collect_view();

    view! {
        <section class="crop-info">
            <h2>"재배 정보"</h2>
            {info_rows}
        </section>
        {sections}
    }
}

#[component]
fn EntryCard(card: CardItem) -> impl IntoView {
    let href = card.href();
    view! {
        <a class="entry-card" href=href>
            {card.thumb.map(|src| view! { <img src=src alt=card.name.clone() loading="lazy" /> })}
            <span>{card.name}</span>
        </a>
    }
}
