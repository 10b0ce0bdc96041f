//! 표시용 텍스트 변환

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BR_TAG: Regex = Regex::new(r"<br\s*/?>").unwrap();
}

/// 값이 없거나 비어 있을 때 표시
pub const NO_INFO: &str = "정보 없음";

/// HTML 텍스트 필드의 `<br>` 태그를 줄바꿈으로 변환
///
/// # Examples
/// ```
/// use smartfarm_common::text::html_to_text;
///
/// assert_eq!(html_to_text(Some("A<br>B<br/>C")), "A\nB\nC");
/// assert_eq!(html_to_text(None), "정보 없음");
/// ```
pub fn html_to_text(html: Option<&str>) -> String {
    match html {
        Some(s) if !s.is_empty() => BR_TAG.replace_all(s, "\n").into_owned(),
        _ => NO_INFO.to_string(),
    }
}

/// 날씨 설명 → 아이콘
///
/// 설명이 없으면 기본 아이콘, 해당 키워드가 없으면 None
pub fn weather_icon(description: Option<&str>) -> Option<&'static str> {
    const ICONS: &[(&str, &str)] = &[
        ("비", "🌧️"),
        ("눈", "❄️"),
        ("구름", "☁️"),
        ("맑", "☀️"),
        ("흐림", "🌥️"),
        ("번개", "⛈️"),
        ("안개", "🌫️"),
    ];

    let desc = match description {
        Some(d) if !d.is_empty() => d.to_lowercase(),
        _ => return Some("🌤️"),
    };
    ICONS
        .iter()
        .find(|(keyword, _)| desc.contains(keyword))
        .map(|(_, icon)| *icon)
}
