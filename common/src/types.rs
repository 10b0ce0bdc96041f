//! API 응답/요청 데이터 타입
//!
//! 웹(WASM)과 CLI에서 공유되는 타입:
//! - Farm / GreenhouseSummary: 농장, 비닐하우스 목록
//! - CropGroup / GroupAxis: 그리드에서 생성된 작물 그룹
//! - IotDevice: 촬영 명령 대상 기기
//! - SensorReading / WeatherReport: 환경 정보
//! - CaptureResponse / UploadResponse: 촬영, 업로드 분석 결과

use crate::crop::CropType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 농장 정보
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Farm {
    pub id: Option<i64>,
    pub name: String,
    pub location: Option<String>,
}

/// 비닐하우스 목록 항목
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GreenhouseSummary {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GreenhouseListResponse {
    pub greenhouses: Vec<GreenhouseSummary>,
}

/// 목록에서 비닐하우스를 삭제하고 다음에 선택할 항목(첫 번째, 없으면 None)을 반환
pub fn remove_greenhouse(list: &mut Vec<GreenhouseSummary>, id: i64) -> Option<GreenhouseSummary> {
    list.retain(|gh| gh.id != id);
    list.first().cloned()
}

/// 그룹 방향. 레이아웃 전체에 대해 하나의 값
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupAxis {
    Row,
    Col,
}

impl GroupAxis {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupAxis::Row => "row",
            GroupAxis::Col => "col",
        }
    }

    pub fn from_horizontal(is_horizontal: bool) -> Self {
        if is_horizontal {
            GroupAxis::Row
        } else {
            GroupAxis::Col
        }
    }
}

/// 작물 그룹 (같은 작물이 한 방향으로 연속된 셀 묶음)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CropGroup {
    #[serde(default)]
    pub id: i64,

    #[serde(default)]
    pub group_cells: Vec<[usize; 2]>,   // (row, col) 목록

    #[serde(default)]
    pub crop_type: CropType,

    #[serde(default)]
    pub is_horizontal: bool,

    #[serde(default)]
    pub harvest_amount: Option<u32>,    // 수확 가능 작물 수

    #[serde(default)]
    pub total_amount: Option<u32>,      // 전체 작물 수
}

impl CropGroup {
    pub fn len(&self) -> usize {
        self.group_cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.group_cells.is_empty()
    }

    pub fn is_path(&self) -> bool {
        self.crop_type.is_path()
    }

    pub fn axis(&self) -> GroupAxis {
        GroupAxis::from_horizontal(self.is_horizontal)
    }

    /// 그룹이 놓인 행(가로 그룹) 또는 열(세로 그룹) 번호 (0부터)
    pub fn line_index(&self) -> Option<usize> {
        let [row, col] = *self.group_cells.first()?;
        Some(if self.is_horizontal { row } else { col })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GroupsResponse {
    pub groups: Vec<CropGroup>,
    pub axis: Option<GroupAxis>,
}

/// IoT 기기
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IotDevice {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IotListResponse {
    pub iot_list: Vec<IotDevice>,
}

/// 최신 센서 측정값
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SensorReading {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub timestamp: Option<String>,
    pub message: Option<String>,
}

/// 측정값이 없을 때의 안내 문구
pub const SENSOR_FALLBACK_MESSAGE: &str = "온습도를 측정하기 위해 IoT를 작동시키세요.";

/// 하우스 환경 패널 표시 상태
#[derive(Debug, Clone, PartialEq)]
pub enum SensorStatus {
    Reading {
        temperature: String,
        humidity: String,
        timestamp: String,
    },
    Unavailable(String),
}

impl SensorReading {
    /// `message`가 있으면 측정값 없음으로 취급
    pub fn status(&self) -> SensorStatus {
        if let Some(message) = self.message.as_deref().filter(|m| !m.is_empty()) {
            return SensorStatus::Unavailable(message.to_string());
        }
        SensorStatus::Reading {
            temperature: self.temperature.map(format_number).unwrap_or_else(|| "-".into()),
            humidity: self.humidity.map(format_number).unwrap_or_else(|| "-".into()),
            timestamp: self.timestamp.clone().unwrap_or_else(|| "-".into()),
        }
    }
}

/// 센서 응답이 없거나 실패했을 때의 상태
pub fn sensor_status(reading: Option<&SensorReading>) -> SensorStatus {
    match reading {
        Some(reading) => reading.status(),
        None => SensorStatus::Unavailable(SENSOR_FALLBACK_MESSAGE.to_string()),
    }
}

/// 숫자 또는 "-" 같은 문자열로 오는 온도 값
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TempValue {
    Number(f64),
    Text(String),
}

impl Default for TempValue {
    fn default() -> Self {
        TempValue::Text("-".to_string())
    }
}

impl TempValue {
    /// 예보 없음 표시("-")인지 여부
    pub fn is_placeholder(&self) -> bool {
        matches!(self, TempValue::Text(s) if s.trim() == "-" || s.trim().is_empty())
    }
}

impl fmt::Display for TempValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TempValue::Number(n) => write!(f, "{}", format_number(*n)),
            TempValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// 오늘 날씨
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CurrentWeather {
    pub temperature: Option<TempValue>,
    pub description: Option<String>,
}

/// 내일/모레 예보
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ForecastDay {
    pub date: String,
    pub min_temp: TempValue,
    pub max_temp: TempValue,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WeatherReport {
    pub weather: Option<CurrentWeather>,
    pub two_day: Vec<ForecastDay>,
}

impl WeatherReport {
    /// 하나라도 실제 예보가 있는지. 모두 "-"이면 예보 없음 카드를 표시
    pub fn has_forecast(&self) -> bool {
        self.two_day.iter().any(|day| !day.min_temp.is_placeholder())
    }
}

impl ForecastDay {
    pub fn temperature_range(&self) -> String {
        if self.min_temp.is_placeholder() {
            "예보 없음".to_string()
        } else {
            format!("{}°C ~ {}°C", self.min_temp, self.max_temp)
        }
    }
}

/// 촬영 명령 요청
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureRequest {
    pub group_id: i64,
    pub iot_id: i64,
}

/// 촬영 후 서버 분석 결과
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CaptureAnalysis {
    pub filename: Option<String>,
    pub ripe: u32,
    pub unripe: u32,
    pub total: u32,
    pub rotten: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CaptureResponse {
    pub ok: Option<bool>,
    pub message: Option<String>,
    pub error: Option<String>,
    pub result: Option<CaptureAnalysis>,
}

/// 업로드 이미지 분석 결과
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UploadAnalysis {
    pub total_files: u32,
    pub total_ripe: u32,
    pub total_unripe: u32,
    pub total_count: u32,
    pub has_rotten: String,
}

impl UploadAnalysis {
    /// 썩은 딸기 발견 여부 (서버는 "발견" 문구로 알려준다)
    pub fn rotten_found(&self) -> bool {
        self.has_rotten.contains("발견")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UploadResponse {
    pub message: Option<String>,
    pub result: Option<UploadAnalysis>,
}

/// 서버 메시지 응답 (`{message}` 또는 `{error}`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiMessage {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ApiMessage {
    pub fn text(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .filter(|s| !s.is_empty())
    }
}

/// 정수면 소수점 없이, 아니면 그대로 표시
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_response_deserialize() {
        let json = r#"{
            "groups": [
                {"id": 3, "group_cells": [[0,0],[0,1],[0,2]], "crop_type": 1,
                 "is_horizontal": true, "harvest_amount": 4, "total_amount": 10}
            ],
            "axis": "row"
        }"#;

        let response: GroupsResponse = serde_json::from_str(json).expect("역직렬화 실패");
        assert_eq!(response.axis, Some(GroupAxis::Row));
        assert_eq!(response.groups.len(), 1);
        let group = &response.groups[0];
        assert_eq!(group.id, 3);
        assert_eq!(group.len(), 3);
        assert_eq!(group.crop_type, CropType::STRAWBERRY);
        assert_eq!(group.harvest_amount, Some(4));
    }

    #[test]
    fn test_groups_response_null_axis() {
        let response: GroupsResponse =
            serde_json::from_str(r#"{"groups": [], "axis": null}"#).expect("역직렬화 실패");
        assert!(response.groups.is_empty());
        assert_eq!(response.axis, None);
    }

    #[test]
    fn test_remove_greenhouse_selects_first() {
        let mut list = vec![
            GreenhouseSummary { id: 1, name: "A동".into() },
            GreenhouseSummary { id: 2, name: "B동".into() },
        ];
        assert_eq!(remove_greenhouse(&mut list, 1).map(|gh| gh.id), Some(2));
        assert_eq!(remove_greenhouse(&mut list, 2), None);
        assert!(list.is_empty());
    }

    #[test]
    fn test_line_index() {
        let row_group = CropGroup {
            group_cells: vec![[2, 0], [2, 1]],
            is_horizontal: true,
            ..Default::default()
        };
        let col_group = CropGroup {
            group_cells: vec![[0, 4], [1, 4]],
            is_horizontal: false,
            ..Default::default()
        };
        assert_eq!(row_group.line_index(), Some(2));
        assert_eq!(col_group.line_index(), Some(4));
        assert_eq!(CropGroup::default().line_index(), None);
    }

    #[test]
    fn test_sensor_status_with_message() {
        let reading: SensorReading = serde_json::from_str(
            r#"{"temperature": null, "humidity": null, "timestamp": null,
                "message": "온습도를 측정하기 위해 IoT를 작동시키세요."}"#,
        )
        .expect("역직렬화 실패");
        assert_eq!(
            reading.status(),
            SensorStatus::Unavailable(SENSOR_FALLBACK_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_sensor_status_reading() {
        let reading = SensorReading {
            temperature: Some(23.5),
            humidity: Some(61.0),
            timestamp: Some("2025-06-01 12:00:00".to_string()),
            message: None,
        };
        assert_eq!(
            reading.status(),
            SensorStatus::Reading {
                temperature: "23.5".to_string(),
                humidity: "61".to_string(),
                timestamp: "2025-06-01 12:00:00".to_string(),
            }
        );
        assert!(matches!(sensor_status(None), SensorStatus::Unavailable(_)));
    }

    #[test]
    fn test_weather_forecast_placeholder() {
        let json = r#"{
            "weather": {"temperature": 21.3, "description": "맑음"},
            "two_day": [
                {"date": "06-02", "min_temp": "-", "max_temp": "-", "description": ""},
                {"date": "06-03", "min_temp": "-", "max_temp": "-", "description": ""}
            ]
        }"#;
        let report: WeatherReport = serde_json::from_str(json).expect("역직렬화 실패");
        assert!(!report.has_forecast());
        assert_eq!(report.two_day[0].temperature_range(), "예보 없음");
    }

    #[test]
    fn test_weather_forecast_numbers() {
        let json = r#"{
            "weather": {"temperature": 21, "description": "구름 많음"},
            "two_day": [{"date": "06-02", "min_temp": 14, "max_temp": 25.5, "description": "비"}]
        }"#;
        let report: WeatherReport = serde_json::from_str(json).expect("역직렬화 실패");
        assert!(report.has_forecast());
        assert_eq!(report.two_day[0].temperature_range(), "14°C ~ 25.5°C");
    }

    #[test]
    fn test_upload_rotten_found() {
        let found = UploadAnalysis {
            has_rotten: "썩은 딸기 발견".to_string(),
            ..Default::default()
        };
        let clean = UploadAnalysis {
            has_rotten: "없음".to_string(),
            ..Default::default()
        };
        assert!(found.rotten_found());
        assert!(!clean.rotten_found());
    }

    #[test]
    fn test_api_message_text() {
        let msg: ApiMessage = serde_json::from_str(r#"{"error": "로그인이 필요합니다."}"#)
            .expect("역직렬화 실패");
        assert_eq!(msg.text(), Some("로그인이 필요합니다."));
        assert_eq!(ApiMessage::default().text(), None);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(12.0), "12");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(-3.0), "-3");
    }
}
