//! 터미널 출력용 텍스트 렌더링
//!
//! 그룹 막대는 웹과 같은 `GroupLayout`을 그룹당 한 줄의 글자 막대로 그린다.

use smartfarm_common::detail::GroupDetail;
use smartfarm_common::encyclopedia::CropDetail;
use smartfarm_common::grid::{Grid, GroupPreview};
use smartfarm_common::layout::{GroupLayout, StackDirection};
use smartfarm_common::text::weather_icon;
use smartfarm_common::types::{
    CropGroup, Farm, GreenhouseSummary, GroupAxis, IotDevice, SensorStatus, UploadAnalysis,
    WeatherReport,
};

const BAR_CHAR: char = '█';
const PATH_CHAR: char = '░';

pub fn farm_header(farm: &Farm) -> String {
    let mut out = format!("{}농장", farm.name);
    if let Some(location) = &farm.location {
        out.push_str(&format!("\n위치: {}", location));
    }
    out
}

pub fn greenhouse_list(list: &[GreenhouseSummary], selected_id: Option<i64>) -> String {
    if list.is_empty() {
        return "등록된 비닐하우스가 없습니다.".to_string();
    }
    list.iter()
        .map(|gh| {
            let marker = if Some(gh.id) == selected_id { "▶" } else { " " };
            format!("{} [{}] {}", marker, gh.id, gh.name)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn weather(report: &WeatherReport) -> String {
    let mut lines = Vec::new();
    match &report.weather {
        Some(today) => {
            let icon = weather_icon(today.description.as_deref()).unwrap_or("");
            let temp = today
                .temperature
                .as_ref()
                .map(|t| format!("{}°C", t))
                .unwrap_or_else(|| "-".to_string());
            lines.push(format!(
                "오늘 {} {} {}",
                icon,
                temp,
                today.description.as_deref().unwrap_or("")
            ));
        }
        None => lines.push("오늘 날씨 정보 없음".to_string()),
    }
    if report.has_forecast() {
        for day in &report.two_day {
            let icon = weather_icon(Some(day.description.as_str())).unwrap_or("");
            lines.push(format!(
                "{} {} {} {}",
                day.date,
                icon,
                day.temperature_range(),
                day.description
            ));
        }
    } else {
        lines.push("예보 없음".to_string());
    }
    lines.join("\n")
}

pub fn sensor(status: &SensorStatus) -> String {
    match status {
        SensorStatus::Reading {
            temperature,
            humidity,
            timestamp,
        } => format!("온도 {}°C / 습도 {}% ({})", temperature, humidity, timestamp),
        SensorStatus::Unavailable(message) => message.clone(),
    }
}

/// 그룹 막대. 선택된 그룹은 `*`, 선택할 수 없는 길은 `·`로 표시
pub fn group_bars(layout: &GroupLayout) -> String {
    if layout.is_empty() {
        return "그룹 정보가 없습니다.".to_string();
    }
    let heading = match layout.direction {
        StackDirection::Vertical => "행 그룹",
        StackDirection::Horizontal => "열 그룹",
    };
    let mut lines = vec![heading.to_string()];
    for seg in &layout.segments {
        let fill = if seg.selectable { BAR_CHAR } else { PATH_CHAR };
        let marker = if seg.selected {
            '*'
        } else if seg.selectable {
            ' '
        } else {
            '·'
        };
        lines.push(format!(
            "{} #{:<4} {:<6} {} ({}칸)",
            marker,
            seg.group_id,
            seg.label,
            fill.to_string().repeat(seg.cell_count),
            seg.cell_count
        ));
    }
    lines.join("\n")
}

pub fn group_detail(detail: &GroupDetail) -> String {
    let mut lines = vec![detail.title.clone()];
    for (label, value) in detail.rows() {
        lines.push(format!("  {}: {}", label, value));
    }
    lines.join("\n")
}

/// 선택 메뉴용 그룹 이름
pub fn group_choice(group: &CropGroup) -> String {
    let unit = if group.axis() == GroupAxis::Row { "행" } else { "열" };
    let line = group
        .line_index()
        .map(|i| format!("{}{}", i + 1, unit))
        .unwrap_or_default();
    format!("#{} {} {} ({}칸)", group.id, line, group.crop_type.label(), group.len())
}

pub fn device_choice(device: &IotDevice) -> String {
    format!("[{}] {}", device.id, device.name)
}

pub fn upload_summary(analysis: &UploadAnalysis) -> String {
    let rotten = if analysis.rotten_found() {
        format!("{} ⚠", analysis.has_rotten)
    } else {
        analysis.has_rotten.clone()
    };
    [
        format!("총 파일: {}", analysis.total_files),
        format!("익은 딸기: {}", analysis.total_ripe),
        format!("안익은 딸기: {}", analysis.total_unripe),
        format!("전체 딸기: {}", analysis.total_count),
        format!("썩은 딸기: {}", rotten),
    ]
    .join("\n")
}

/// 그리드 코드 표
pub fn grid(grid: &Grid) -> String {
    grid.iter()
        .map(|row| {
            row.iter()
                .map(|code| code.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// 저장 시 서버가 다시 만들 그룹 미리보기
pub fn group_preview(axis: GroupAxis, groups: &[GroupPreview]) -> String {
    let mut lines = vec![format!(
        "{}개 그룹 ({} 기준)",
        groups.len(),
        if axis == GroupAxis::Row { "행" } else { "열" }
    )];
    for (i, group) in groups.iter().enumerate() {
        lines.push(format!(
            "  {}. {} {}칸",
            i + 1,
            group.crop_type.label(),
            group.cells.len()
        ));
    }
    lines.join("\n")
}

pub fn crop_detail(crop_name: &str, detail: &CropDetail) -> String {
    let mut lines = vec![crop_name.to_string()];
    for (label, value) in detail.info.rows() {
        lines.push(format!("  {}: {}", label, value));
    }
    for (title, cards, empty) in detail.sections() {
        lines.push(String::new());
        lines.push(title.to_string());
        if cards.is_empty() {
            lines.push(format!("  {}", empty));
        }
        for card in cards {
            lines.push(format!("  - {} ({})", card.name, card.href()));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartfarm_common::crop::CropType;
    use smartfarm_common::layout::layout_segments;

    #[test]
    fn test_group_bars_marks_selection_and_path() {
        let groups = vec![
            CropGroup {
                id: 1,
                group_cells: vec![[0, 0], [0, 1], [0, 2]],
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
        let layout = layout_segments(Some(groups.as_slice()), GroupAxis::Row, Some(1));
        let text = group_bars(&layout);
        assert!(text.starts_with("행 그룹"));
        assert!(text.contains("* #1"));
        assert!(text.contains("███"));
        assert!(text.contains("· #2"));
        assert!(text.contains("░░"));
    }

    #[test]
    fn test_empty_layout() {
        let layout = layout_segments(None, GroupAxis::Col, None);
        assert_eq!(group_bars(&layout), "그룹 정보가 없습니다.");
    }
}
