//! 병해 / 해충 / 천적 상세 (`/encyclopedia/{kind}/:id`)

use crate::api::encyclopedia::fetch_entry;
use crate::components::loading::Loading;
use crate::config::{use_api_config, ApiConfig};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;
use serde::de::DeserializeOwned;
use smartfarm_common::encyclopedia::{
    DiseaseRecord, EncyclopediaEntry, EnemyRecord, EntryImage, EntryKind, InsectRecord,
};

/// 화면에 그릴 내용 (레코드 종류와 무관)
#[derive(Debug, Clone, PartialEq)]
pub struct EntryContent {
    pub title: String,
    pub section_title: &'static str,
    pub fields: Vec<(&'static str, String)>,
    pub images_title: &'static str,
    pub images: Vec<EntryImage>,
}

impl EntryContent {
    pub fn from_entry<T: EncyclopediaEntry>(entry: &T) -> Self {
        Self {
            title: entry.title(),
            section_title: entry.section_title(),
            fields: entry.fields(),
            images_title: entry.images_title(),
            images: entry.images(),
        }
    }
}

async fn load<T>(config: &ApiConfig, id: &str) -> Result<EntryContent, String>
where
    T: EncyclopediaEntry + DeserializeOwned,
{
    let record: T = fetch_entry(config, T::KIND, id).await?;
    Ok(EntryContent::from_entry(&record))
}

#[component]
pub fn EntryPage(kind: EntryKind) -> impl IntoView {
    let params = use_params_map();
    let id = Memo::new(move |_| params.with(|p| p.get("id").map(|s| s.to_string()).unwrap_or_default()));
    let config = use_api_config();

    let content = RwSignal::new(None::<Result<EntryContent, String>>);

    Effect::new(move |_| {
        let id = id.get();
        content.set(None);
        let config = config.clone();
        spawn_local(async move {
            let result = match kind {
                EntryKind::Disease => load::<DiseaseRecord>(&config, &id).await,
                EntryKind::Insect => load::<InsectRecord>(&config, &id).await,
                EntryKind::Enemy => load::<EnemyRecord>(&config, &id).await,
            };
            content.set(Some(result));
        });
    });

    view! {
        <div class="encyclopedia entry-page">
            <button class="back-link" on:click=|_| {
                if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
                    _ = history.back();
                }
            }>"← 뒤로 가기"</button>
            {move || match content.get() {
                None => view! { <Loading label="로딩 중..." /> }.into_any(),
                Some(Err(message)) => view! { <p class="error-text">{message}</p> }.into_any(),
                Some(Ok(content)) => view! { <EntryDetail content=content /> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn EntryDetail(content: EntryContent) -> impl IntoView {
    let fields = content
        .fields
        .into_iter()
        .map(|(label, value)| view! {
            <div class="entry-field">
                <h3>{label}</h3>
                <p style="white-space: pre-line;">{value}</p>
            </div>
        })
        .collect_view();

    let images = if content.images.is_empty() {
        None
    } else {
        let items = content
            .images
            .into_iter()
            .map(|img| view! {
                <figure>
                    <img src=img.src alt=img.alt.clone() loading="lazy" />
                    <figcaption>{img.alt}</figcaption>
                </figure>
            })
            .collect_view();
        Some(view! {
            <section class="entry-images">
                <h2>{content.images_title}</h2>
                <div class="image-grid">{items}</div>
            </section>
        })
    };

    view! {
        <h1>{content.title}</h1>
        <section class="entry-info">
            <h2>{content.section_title}</h2>
            {fields}
        </section>
        {images}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_from_disease() {
        let record = DiseaseRecord {
            sick_name_kor: Some("잿빛곰팡이병".to_string()),
            symptoms: Some("잎에<br>반점".to_string()),
            ..Default::default()
        };
        let content = EntryContent::from_entry(&record);
        assert_eq!(content.title, "잿빛곰팡이병");
        assert!(content.fields.iter().any(|(_, v)| v == "잎에\n반점"));
        assert!(content.images.is_empty());
    }
}
