//! 농장 / 비닐하우스 API

use super::fetch::{get_json, send_form, send_json, send_raw};
use crate::config::ApiConfig;
use smartfarm_common::api::{self, Route, UPLOAD_GROUP_FIELD, UPLOAD_IMAGES_FIELD};
use smartfarm_common::grid::{GridResponse, UpdateGreenhouseRequest};
use smartfarm_common::types::{
    CaptureRequest, Farm, GreenhouseListResponse, GreenhouseSummary, GroupsResponse, IotDevice,
    IotListResponse, SensorReading, WeatherReport,
};
use smartfarm_common::workflow::{CaptureOutcome, UploadOutcome};
use web_sys::{File, FormData};

pub async fn fetch_farm(config: &ApiConfig, farm_id: i64) -> Result<Farm, String> {
    get_json(config, &Route::farm(farm_id)).await
}

pub async fn fetch_greenhouses(config: &ApiConfig, farm_id: i64) -> Result<Vec<GreenhouseSummary>, String> {
    let response: GreenhouseListResponse = get_json(config, &Route::greenhouse_list(farm_id)).await?;
    Ok(response.greenhouses)
}

pub async fn fetch_weather(config: &ApiConfig, city: &str) -> Result<WeatherReport, String> {
    get_json(config, &Route::weather(city)).await
}

pub async fn fetch_grid(config: &ApiConfig, greenhouse_id: i64) -> Result<GridResponse, String> {
    get_json(config, &Route::grid(greenhouse_id)).await
}

pub async fn fetch_groups(config: &ApiConfig, greenhouse_id: i64) -> Result<GroupsResponse, String> {
    get_json(config, &Route::groups(greenhouse_id)).await
}

pub async fn fetch_sensor(config: &ApiConfig, greenhouse_id: i64) -> Result<SensorReading, String> {
    get_json(config, &Route::sensor_latest(greenhouse_id)).await
}

pub async fn fetch_iot_list(config: &ApiConfig) -> Result<Vec<IotDevice>, String> {
    let response: IotListResponse = get_json(config, &Route::iot_list()).await?;
    Ok(response.iot_list)
}

pub async fn save_grid(
    config: &ApiConfig,
    greenhouse_id: i64,
    request: &UpdateGreenhouseRequest,
) -> Result<(), String> {
    let raw = send_json(config, &Route::update_greenhouse(greenhouse_id), request).await?;
    api::expect_success(raw.status, &raw.body).map_err(|e| e.to_string())
}

pub async fn delete_greenhouse(config: &ApiConfig, greenhouse_id: i64) -> Result<(), String> {
    let raw = send_raw(config, &Route::delete_greenhouse(greenhouse_id)).await?;
    api::expect_success(raw.status, &raw.body).map_err(|e| e.to_string())
}

/// 촬영 명령 전송. 전송 실패도 결과로 돌려준다
pub async fn send_capture(config: &ApiConfig, request: &CaptureRequest) -> CaptureOutcome {
    match send_json(config, &Route::capture(), request).await {
        Ok(raw) => api::capture_outcome(raw.status, &raw.body),
        Err(e) => {
            log::warn!("촬영 명령 전송 실패: {}", e);
            CaptureOutcome::Network(e)
        }
    }
}

fn build_upload_form(group_id: i64, files: &[File]) -> Result<FormData, String> {
    let form = FormData::new().map_err(|e| format!("FormData 생성 실패: {:?}", e))?;
    form.append_with_str(UPLOAD_GROUP_FIELD, &group_id.to_string())
        .map_err(|e| format!("FormData 추가 실패: {:?}", e))?;
    for file in files {
        form.append_with_blob_and_filename(UPLOAD_IMAGES_FIELD, file, &file.name())
            .map_err(|e| format!("FormData 추가 실패: {:?}", e))?;
    }
    Ok(form)
}

/// 이미지 업로드 분석
pub async fn upload_images(config: &ApiConfig, group_id: i64, files: &[File]) -> UploadOutcome {
    let form = match build_upload_form(group_id, files) {
        Ok(form) => form,
        Err(e) => return UploadOutcome::Network(e),
    };
    match send_form(config, &Route::upload_analyze(), &form).await {
        Ok(raw) => api::upload_outcome(raw.status, &raw.body),
        Err(e) => {
            log::warn!("업로드 실패: {}", e);
            UploadOutcome::Network(e)
        }
    }
}
