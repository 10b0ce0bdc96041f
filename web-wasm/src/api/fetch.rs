//! fetch 공통 처리
//!
//! 모든 요청은 세션 쿠키를 포함한다(`credentials: include`).
//! 응답은 상태 코드와 본문 문자열로 받아 `smartfarm_common::api`에서 해석한다.

use crate::config::ApiConfig;
use serde::de::DeserializeOwned;
use serde::Serialize;
use smartfarm_common::api::{self, Route};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Request, RequestCredentials, RequestInit, RequestMode, Response};

/// 해석 전 응답
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

fn request_init(route: &Route) -> RequestInit {
    let opts = RequestInit::new();
    opts.set_method(route.method.as_str());
    opts.set_mode(RequestMode::Cors);
    opts.set_credentials(RequestCredentials::Include);
    opts
}

async fn send(url: &str, opts: &RequestInit, json_body: bool) -> Result<RawResponse, String> {
    let request = Request::new_with_str_and_init(url, opts)
        .map_err(|e| format!("요청 생성 실패: {:?}", e))?;
    if json_body {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|e| format!("헤더 설정 실패: {:?}", e))?;
    }

    let window = web_sys::window().ok_or_else(|| "window를 찾을 수 없습니다".to_string())?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("네트워크 오류: {:?}", e))?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|e| format!("응답 변환 실패: {:?}", e))?;

    let text_promise = resp.text().map_err(|e| format!("응답 읽기 실패: {:?}", e))?;
    let text = JsFuture::from(text_promise)
        .await
        .map_err(|e| format!("응답 읽기 실패: {:?}", e))?;

    Ok(RawResponse {
        status: resp.status(),
        body: text.as_string().unwrap_or_default(),
    })
}

/// 본문 없는 요청 (GET / DELETE)
pub async fn send_raw(config: &ApiConfig, route: &Route) -> Result<RawResponse, String> {
    let url = config.url(route)?;
    log::debug!("{} {}", route.method.as_str(), url);
    send(&url, &request_init(route), false).await
}

/// JSON 본문 요청
pub async fn send_json<B: Serialize>(
    config: &ApiConfig,
    route: &Route,
    body: &B,
) -> Result<RawResponse, String> {
    let url = config.url(route)?;
    let body = serde_json::to_string(body).map_err(|e| format!("JSON 직렬화 실패: {}", e))?;
    let opts = request_init(route);
    opts.set_body(&JsValue::from_str(&body));
    log::debug!("{} {}", route.method.as_str(), url);
    send(&url, &opts, true).await
}

/// multipart 본문 요청 (Content-Type은 브라우저가 boundary와 함께 설정)
pub async fn send_form(config: &ApiConfig, route: &Route, form: &FormData) -> Result<RawResponse, String> {
    let url = config.url(route)?;
    let opts = request_init(route);
    opts.set_body(form.as_ref());
    log::debug!("{} {} (multipart)", route.method.as_str(), url);
    send(&url, &opts, false).await
}

/// GET 후 JSON 해석
pub async fn get_json<T: DeserializeOwned>(config: &ApiConfig, route: &Route) -> Result<T, String> {
    let raw = send_raw(config, route).await?;
    api::decode(raw.status, &raw.body).map_err(|e| {
        log::warn!("{} 응답 해석 실패: {}", route.path, e);
        e.to_string()
    })
}
