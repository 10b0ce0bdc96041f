//! REST API 경로와 응답 해석
//!
//! 경로는 설정된 base URL 기준. 모든 요청은 세션 쿠키를 함께 보낸다.
//! 실제 전송은 웹(`web-sys` fetch)과 CLI(`reqwest`)가 각각 담당하고,
//! 여기서는 URL 조립과 상태 코드/본문 해석만 한다.

use crate::error::{Error, Result};
use crate::statistics::{GraphKind, YearSelection};
use crate::types::{ApiMessage, CaptureResponse, UploadResponse};
use crate::workflow::{CaptureOutcome, UploadOutcome};
use serde::de::DeserializeOwned;
use url::Url;

/// 기본 API 서버
pub const DEFAULT_BASE_URL: &str = "http://localhost:5001";

/// 업로드 multipart 필드 이름
pub const UPLOAD_GROUP_FIELD: &str = "group_id";
pub const UPLOAD_IMAGES_FIELD: &str = "images";

// 화면 배너 문구
pub const ERR_FARM: &str = "농장 정보를 불러오는데 실패했습니다.";
pub const ERR_GREENHOUSES: &str = "온실 목록을 불러오는데 실패했습니다.";
pub const ERR_WEATHER: &str = "날씨 정보를 불러오는데 실패했습니다.";
pub const ERR_GRID: &str = "그리드 데이터를 불러오는데 실패했습니다.";
pub const ERR_GROUPS: &str = "그룹 정보를 불러오는데 실패했습니다.";
pub const ERR_GRID_SAVE: &str = "그리드 저장에 실패했습니다.";
pub const ERR_DELETE: &str = "하우스 삭제에 실패했습니다.";
pub const CONFIRM_DELETE: &str = "정말로 이 하우스를 삭제하시겠습니까?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

/// API 엔드포인트
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub method: Method,
    pub path: String,
    pub query: Vec<(&'static str, String)>,
}

impl Route {
    fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            query: Vec::new(),
        }
    }

    fn post(path: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            query: Vec::new(),
        }
    }

    fn with_query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    /// base URL과 합쳐 전체 URL 생성 (쿼리는 퍼센트 인코딩)
    ///
    /// base URL에 경로 접두사가 있으면 유지된다.
    pub fn url(&self, base_url: &str) -> Result<String> {
        let joined = format!("{}{}", base_url.trim_end_matches('/'), self.path);
        let mut url = Url::parse(&joined)
            .map_err(|e| Error::Config(format!("잘못된 API 주소 {}: {}", base_url, e)))?;
        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url.into())
    }

    pub fn farm(farm_id: i64) -> Self {
        Self::get(format!("/api/farms/{}", farm_id))
    }

    pub fn greenhouse_list(farm_id: i64) -> Self {
        Self::get(format!("/api/greenhouses/list/{}", farm_id))
    }

    pub fn weather(city: &str) -> Self {
        Self::get("/api/weather").with_query("city", city)
    }

    pub fn grid(greenhouse_id: i64) -> Self {
        Self::get("/api/greenhouses/api/grid").with_query("id", greenhouse_id)
    }

    pub fn groups(greenhouse_id: i64) -> Self {
        Self::get(format!("/api/greenhouses/{}/groups", greenhouse_id))
    }

    pub fn sensor_latest(greenhouse_id: i64) -> Self {
        Self::get("/api/sensor/latest").with_query("gh_id", greenhouse_id)
    }

    pub fn update_greenhouse(greenhouse_id: i64) -> Self {
        Self::post(format!("/api/greenhouses/update/{}", greenhouse_id))
    }

    pub fn delete_greenhouse(greenhouse_id: i64) -> Self {
        Self {
            method: Method::Delete,
            path: format!("/api/greenhouses/{}", greenhouse_id),
            query: Vec::new(),
        }
    }

    pub fn iot_list() -> Self {
        Self::get("/api/iot/list")
    }

    pub fn capture() -> Self {
        Self::post("/api/greenhouses/crop_groups/read")
    }

    pub fn upload_analyze() -> Self {
        Self::post("/api/greenhouses/crop_groups/upload_analyze")
    }

    pub fn crop_detail(crop: &str) -> Self {
        Self::get(format!("/api/crops/detail/{}", crop))
    }

    pub fn disease(id: &str) -> Self {
        Self::get(format!("/api/diseases/{}", id))
    }

    pub fn insect(id: &str) -> Self {
        Self::get(format!("/api/insects/{}", id))
    }

    pub fn enemy(id: &str) -> Self {
        Self::get(format!("/api/enemies/{}", id))
    }

    pub fn statistics(graph: GraphKind, years: &YearSelection) -> Self {
        Self {
            method: Method::Get,
            path: "/api/statistics".to_string(),
            query: years.query(graph),
        }
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// 에러 응답 본문에서 서버 메시지 추출. 없으면 "HTTP {status}"
pub fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ApiMessage>(body)
        .ok()
        .and_then(|msg| msg.text().map(str::to_string))
        .unwrap_or_else(|| format!("HTTP {}", status))
}

/// 응답 해석: 2xx가 아니면 `Error::Http`, 본문이 잘못되면 `Error::Json`
pub fn decode<T: DeserializeOwned>(status: u16, body: &str) -> Result<T> {
    if !is_success(status) {
        return Err(Error::Http {
            status,
            message: error_message(status, body),
        });
    }
    Ok(serde_json::from_str(body)?)
}

/// 본문이 없는 요청(저장/삭제) 결과 확인
pub fn expect_success(status: u16, body: &str) -> Result<()> {
    if is_success(status) {
        Ok(())
    } else {
        Err(Error::Http {
            status,
            message: error_message(status, body),
        })
    }
}

/// 촬영 명령 응답 해석
///
/// 2xx이고 `ok`가 false가 아니면 수락. 본문을 읽을 수 없으면 네트워크 오류로 취급
pub fn capture_outcome(status: u16, body: &str) -> CaptureOutcome {
    let response: CaptureResponse = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => return CaptureOutcome::Network(e.to_string()),
    };
    if is_success(status) && response.ok != Some(false) {
        CaptureOutcome::Accepted
    } else {
        let message = response
            .message
            .or(response.error)
            .unwrap_or_else(|| format!("HTTP {}", status));
        CaptureOutcome::Rejected(message)
    }
}

/// 업로드 분석 응답 해석
pub fn upload_outcome(status: u16, body: &str) -> UploadOutcome {
    let response: UploadResponse = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => return UploadOutcome::Network(e.to_string()),
    };
    match (is_success(status), response.result) {
        (true, Some(analysis)) => UploadOutcome::Analyzed(analysis),
        (_, _) => UploadOutcome::Rejected(
            response
                .message
                .unwrap_or_else(|| format!("HTTP {}", status)),
        ),
    }
}
