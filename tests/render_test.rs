//! 터미널 출력 테스트

use smartfarm::render;
use smartfarm_common::crop::CropType;
use smartfarm_common::grid::compute_groups;
use smartfarm_common::layout::layout_segments;
use smartfarm_common::types::{
    sensor_status, CropGroup, Farm, GreenhouseSummary, GroupAxis, UploadAnalysis, WeatherReport,
    SENSOR_FALLBACK_MESSAGE,
};

/// 농장 헤더
#[test]
fn test_farm_header() {
    let farm = Farm {
        id: Some(1),
        name: "햇살".to_string(),
        location: Some("Jeonju".to_string()),
    };
    assert_eq!(render::farm_header(&farm), "햇살농장\n위치: Jeonju");
}

/// 선택된 하우스 표시
#[test]
fn test_greenhouse_list() {
    let list = vec![
        GreenhouseSummary { id: 1, name: "1동".to_string() },
        GreenhouseSummary { id: 2, name: "2동".to_string() },
    ];
    let text = render::greenhouse_list(&list, Some(2));
    assert!(text.contains("▶ [2] 2동"));
    assert!(text.contains("  [1] 1동"));
    assert_eq!(render::greenhouse_list(&[], None), "등록된 비닐하우스가 없습니다.");
}

/// 예보가 모두 "-"이면 예보 없음
#[test]
fn test_weather_placeholder_forecast() {
    let report: WeatherReport = serde_json::from_value(serde_json::json!({
        "weather": {"temperature": 21, "description": "맑음"},
        "two_day": [
            {"date": "06-02", "min_temp": "-", "max_temp": "-", "description": ""}
        ]
    }))
    .expect("역직렬화 실패");

    let text = render::weather(&report);
    assert!(text.contains("☀️"));
    assert!(text.contains("21°C"));
    assert!(text.ends_with("예보 없음"));
}

/// 예보가 있으면 날짜별 온도 범위
#[test]
fn test_weather_forecast() {
    let report: WeatherReport = serde_json::from_value(serde_json::json!({
        "weather": {"temperature": "18", "description": "비"},
        "two_day": [
            {"date": "06-02", "min_temp": 14, "max_temp": 25, "description": "구름 많음"}
        ]
    }))
    .expect("역직렬화 실패");

    let text = render::weather(&report);
    assert!(text.contains("🌧️"));
    assert!(text.contains("06-02 ☁️"));
    assert!(text.contains("°C ~ "));
}

/// 센서 응답이 없으면 안내 문구
#[test]
fn test_sensor_fallback() {
    assert_eq!(render::sensor(&sensor_status(None)), SENSOR_FALLBACK_MESSAGE);
}

/// 길은 선택 불가 표시, 선택된 그룹은 `*`
#[test]
fn test_group_bars_markers() {
    let groups = vec![
        CropGroup {
            id: 1,
            group_cells: vec![[0, 0], [0, 1]],
            crop_type: CropType::STRAWBERRY,
            is_horizontal: true,
            ..Default::default()
        },
        CropGroup {
            id: 2,
            group_cells: vec![[1, 0], [1, 1]],
            crop_type: CropType::PATH,
            is_horizontal: true,
            ..Default::default()
        },
    ];
    let text = render::group_bars(&layout_segments(Some(groups.as_slice()), GroupAxis::Row, Some(1)));
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "행 그룹");
    assert!(lines[1].starts_with('*'));
    assert!(lines[1].contains("██"));
    assert!(lines[2].starts_with('·'));
    assert!(lines[2].contains("░░"));
}

/// 썩은 딸기 발견 시 경고 표시
#[test]
fn test_upload_summary() {
    let analysis = UploadAnalysis {
        total_files: 3,
        total_ripe: 4,
        total_unripe: 2,
        total_count: 6,
        has_rotten: "발견됨".to_string(),
    };
    let text = render::upload_summary(&analysis);
    assert!(text.contains("총 파일: 3"));
    assert!(text.contains("전체 딸기: 6"));
    assert!(text.contains("발견됨 ⚠"));
}

/// 그리드 표와 저장 전 그룹 미리보기
#[test]
fn test_grid_and_preview() {
    let grid = vec![vec![1, 1, 1], vec![0, 0, 0], vec![2, 2, 2]];
    assert_eq!(render::grid(&grid), "1 1 1\n0 0 0\n2 2 2");

    let (axis, groups) = compute_groups(&grid);
    let text = render::group_preview(axis, &groups);
    assert!(text.starts_with("3개 그룹 (행 기준)"));
    assert!(text.contains("토마토 3칸"));
}
