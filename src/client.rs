//! REST API 클라이언트 (reqwest)
//!
//! URL 조립과 응답 해석은 `smartfarm_common::api`를 그대로 쓰고,
//! 여기서는 전송과 세션 쿠키만 담당한다.

use crate::config::Config;
use crate::error::{Result, SmartFarmError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Serialize;
use smartfarm_common::api::{self, Method, Route, UPLOAD_GROUP_FIELD, UPLOAD_IMAGES_FIELD};
use smartfarm_common::encyclopedia::{CropDetail, EntryKind};
use smartfarm_common::grid::{GridResponse, UpdateGreenhouseRequest};
use smartfarm_common::statistics::{GraphKind, StatisticsResponse, YearSelection};
use smartfarm_common::types::{
    CaptureRequest, Farm, GreenhouseListResponse, GreenhouseSummary, GroupsResponse, IotDevice,
    IotListResponse, SensorReading, WeatherReport,
};
use smartfarm_common::workflow::{CaptureOutcome, UploadOutcome};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 작업 화면이 쓰는 API
///
/// 테스트에서는 메모리 구현으로 바꿔 끼운다.
#[async_trait]
pub trait FarmApi: Send + Sync {
    async fn farm(&self, farm_id: i64) -> Result<Farm>;
    async fn greenhouses(&self, farm_id: i64) -> Result<Vec<GreenhouseSummary>>;
    async fn grid(&self, greenhouse_id: i64) -> Result<GridResponse>;
    async fn groups(&self, greenhouse_id: i64) -> Result<GroupsResponse>;
    async fn sensor(&self, greenhouse_id: i64) -> Result<SensorReading>;
    async fn iot_list(&self) -> Result<Vec<IotDevice>>;

    /// 전송 실패도 결과로 돌려준다
    async fn capture(&self, request: &CaptureRequest) -> CaptureOutcome;
    async fn upload(&self, group_id: i64, files: &[PathBuf]) -> UploadOutcome;
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

/// 해석 전 응답
struct RawResponse {
    status: u16,
    body: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = &config.session_cookie {
            let value = HeaderValue::from_str(cookie)
                .map_err(|e| SmartFarmError::Config(format!("세션 쿠키 형식 오류: {}", e)))?;
            headers.insert(COOKIE, value);
        }
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    fn request(&self, route: &Route) -> Result<reqwest::RequestBuilder> {
        let url = route.url(&self.base_url)?;
        tracing::debug!(method = route.method.as_str(), %url, "요청");
        let builder = match route.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
            Method::Delete => self.http.delete(&url),
        };
        Ok(builder)
    }

    async fn read(response: reqwest::Response) -> Result<RawResponse> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!(status, bytes = body.len(), "응답");
        Ok(RawResponse { status, body })
    }

    async fn send(&self, route: &Route) -> Result<RawResponse> {
        let response = self.request(route)?.send().await?;
        Self::read(response).await
    }

    async fn send_json<B: Serialize + Sync>(&self, route: &Route, body: &B) -> Result<RawResponse> {
        let response = self.request(route)?.json(body).send().await?;
        Self::read(response).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, route: &Route) -> Result<T> {
        let raw = self.send(route).await?;
        Ok(api::decode(raw.status, &raw.body)?)
    }

    pub async fn weather(&self, city: &str) -> Result<WeatherReport> {
        self.get_json(&Route::weather(city)).await
    }

    pub async fn update_greenhouse(
        &self,
        greenhouse_id: i64,
        request: &UpdateGreenhouseRequest,
    ) -> Result<()> {
        let raw = self
            .send_json(&Route::update_greenhouse(greenhouse_id), request)
            .await?;
        Ok(api::expect_success(raw.status, &raw.body)?)
    }

    pub async fn delete_greenhouse(&self, greenhouse_id: i64) -> Result<()> {
        let raw = self.send(&Route::delete_greenhouse(greenhouse_id)).await?;
        Ok(api::expect_success(raw.status, &raw.body)?)
    }

    pub async fn crop_detail(&self, crop: &str) -> Result<CropDetail> {
        self.get_json(&Route::crop_detail(crop)).await
    }

    /// 병해 / 해충 / 천적 상세
    pub async fn entry<T: DeserializeOwned>(&self, kind: EntryKind, id: &str) -> Result<T> {
        let route = match kind {
            EntryKind::Disease => Route::disease(id),
            EntryKind::Insect => Route::insect(id),
            EntryKind::Enemy => Route::enemy(id),
        };
        self.get_json(&route).await
    }

    pub async fn statistics(&self, graph: GraphKind, years: &YearSelection) -> Result<StatisticsResponse> {
        self.get_json(&Route::statistics(graph, years)).await
    }

    async fn upload_form(group_id: i64, files: &[PathBuf]) -> Result<Form> {
        let mut form = Form::new().text(UPLOAD_GROUP_FIELD, group_id.to_string());
        for path in files {
            let bytes = tokio::fs::read(path).await?;
            let part = Part::bytes(bytes)
                .file_name(file_name(path))
                .mime_str(mime_type(path))?;
            form = form.part(UPLOAD_IMAGES_FIELD, part);
        }
        Ok(form)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string())
}

fn mime_type(path: &Path) -> &'static str {
    match path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

#[async_trait]
impl FarmApi for ApiClient {
    async fn farm(&self, farm_id: i64) -> Result<Farm> {
        self.get_json(&Route::farm(farm_id)).await
    }

    async fn greenhouses(&self, farm_id: i64) -> Result<Vec<GreenhouseSummary>> {
        let response: GreenhouseListResponse = self.get_json(&Route::greenhouse_list(farm_id)).await?;
        Ok(response.greenhouses)
    }

    async fn grid(&self, greenhouse_id: i64) -> Result<GridResponse> {
        self.get_json(&Route::grid(greenhouse_id)).await
    }

    async fn groups(&self, greenhouse_id: i64) -> Result<GroupsResponse> {
        self.get_json(&Route::groups(greenhouse_id)).await
    }

    async fn sensor(&self, greenhouse_id: i64) -> Result<SensorReading> {
        self.get_json(&Route::sensor_latest(greenhouse_id)).await
    }

    async fn iot_list(&self) -> Result<Vec<IotDevice>> {
        let response: IotListResponse = self.get_json(&Route::iot_list()).await?;
        Ok(response.iot_list)
    }

    async fn capture(&self, request: &CaptureRequest) -> CaptureOutcome {
        match self.send_json(&Route::capture(), request).await {
            Ok(raw) => api::capture_outcome(raw.status, &raw.body),
            Err(e) => {
                tracing::warn!("촬영 명령 전송 실패: {}", e);
                CaptureOutcome::Network(e.to_string())
            }
        }
    }

    async fn upload(&self, group_id: i64, files: &[PathBuf]) -> UploadOutcome {
        let form = match Self::upload_form(group_id, files).await {
            Ok(form) => form,
            Err(e) => return UploadOutcome::Network(e.to_string()),
        };
        let sent = match self.request(&Route::upload_analyze()) {
            Ok(builder) => builder.multipart(form).send().await.map_err(SmartFarmError::from),
            Err(e) => Err(e),
        };
        match sent {
            Ok(response) => match Self::read(response).await {
                Ok(raw) => api::upload_outcome(raw.status, &raw.body),
                Err(e) => UploadOutcome::Network(e.to_string()),
            },
            Err(e) => {
                tracing::warn!("업로드 실패: {}", e);
                UploadOutcome::Network(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type() {
        assert_eq!(mime_type(Path::new("a.PNG")), "image/png");
        assert_eq!(mime_type(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(mime_type(Path::new("noext")), "image/jpeg");
    }

    #[test]
    fn test_client_rejects_bad_cookie() {
        let config = Config {
            session_cookie: Some("bad\ncookie".to_string()),
            ..Default::default()
        };
        assert!(matches!(ApiClient::new(&config), Err(SmartFarmError::Config(_))));
    }
}
