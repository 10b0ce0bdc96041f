//! API 설정
//!
//! base URL은 빌드 시 `SMARTFARM_API_BASE_URL` 환경 변수로 지정하고
//! Leptos context로 주입한다.

use leptos::prelude::*;
use smartfarm_common::api::{Route, DEFAULT_BASE_URL};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(option_env!("SMARTFARM_API_BASE_URL").unwrap_or(DEFAULT_BASE_URL))
    }
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, route: &Route) -> Result<String, String> {
        route.url(&self.base_url).map_err(|e| e.to_string())
    }
}

/// context에서 설정 조회. 없으면 기본값
pub fn use_api_config() -> ApiConfig {
    use_context::<ApiConfig>().unwrap_or_default()
}
