//! 작물 도감 API

use super::fetch::get_json;
use crate::config::ApiConfig;
use serde::de::DeserializeOwned;
use smartfarm_common::api::Route;
use smartfarm_common::encyclopedia::{CropDetail, EntryKind};

pub async fn fetch_crop_detail(config: &ApiConfig, crop: &str) -> Result<CropDetail, String> {
    get_json(config, &Route::crop_detail(crop))
        .await
        .map_err(|_| format!("{}에 대한 정보를 불러올 수 없습니다.", crop))
}

/// 병해 / 해충 / 천적 상세
pub async fn fetch_entry<T: DeserializeOwned>(
    config: &ApiConfig,
    kind: EntryKind,
    id: &str,
) -> Result<T, String> {
    let route = match kind {
        EntryKind::Disease => Route::disease(id),
        EntryKind::Insect => Route::insect(id),
        EntryKind::Enemy => Route::enemy(id),
    };
    get_json(config, &route).await.map_err(|e| {
        log::warn!("{} {} 불러오기 실패: {}", kind.as_str(), id, e);
        kind.load_error().to_string()
    })
}
