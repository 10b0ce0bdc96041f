//! 그룹 막대(세그먼트) 레이아웃
//!
//! 그룹 목록과 방향으로부터 화면에 그릴 막대의 크기/색상/라벨을 계산한다.
//! 웹은 `<div>`로, CLI는 텍스트 막대로 그린다.

use crate::crop::CropType;
use crate::types::{CropGroup, GroupAxis};

/// 셀 하나의 크기 (px)
pub const CELL_SIZE_PX: u32 = 45;

/// 막대 사이 간격 (px)
pub const SEGMENT_GAP_PX: u32 = 16;

/// 막대를 쌓는 방향
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackDirection {
    /// 위에서 아래로 (flex-direction: column)
    Vertical,
    /// 왼쪽에서 오른쪽으로 (flex-direction: row)
    Horizontal,
}

impl StackDirection {
    /// 행 그룹은 세로로 쌓고, 열 그룹은 가로로 나열한다
    pub fn from_axis(axis: GroupAxis) -> Self {
        match axis {
            GroupAxis::Row => StackDirection::Vertical,
            GroupAxis::Col => StackDirection::Horizontal,
        }
    }

    pub fn flex_direction(&self) -> &'static str {
        match self {
            StackDirection::Vertical => "column",
            StackDirection::Horizontal => "row",
        }
    }
}

/// 막대 하나의 레이아웃
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentLayout {
    pub group_id: i64,
    pub crop_type: CropType,
    pub label: String,
    pub color: &'static str,
    pub cell_count: usize,
    pub width_px: u32,
    pub height_px: u32,
    pub vertical_text: bool,    // 세로 그룹은 라벨을 세로 쓰기
    pub selectable: bool,       // 길은 선택 불가
    pub selected: bool,
}

impl SegmentLayout {
    /// CSS 클래스 (`merged-bar type-{code}` + 선택 상태)
    pub fn css_class(&self) -> String {
        let mut class = format!("merged-bar type-{}", self.crop_type.code());
        if self.vertical_text {
            class.push_str(" vertical-text");
        }
        if self.selected {
            class.push_str(" capture-bar-selected");
        }
        if !self.selectable {
            class.push_str(" capture-bar-disabled");
        }
        class
    }

    /// 인라인 스타일
    pub fn style(&self) -> String {
        format!(
            "width: {}px; height: {}px; background-color: {};",
            self.width_px, self.height_px, self.color
        )
    }
}

/// 그룹 목록 전체의 레이아웃
#[derive(Debug, Clone, PartialEq)]
pub struct GroupLayout {
    pub direction: StackDirection,
    pub gap_px: u32,
    pub segments: Vec<SegmentLayout>,
}

impl GroupLayout {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn container_style(&self) -> String {
        format!(
            "display: flex; flex-direction: {}; gap: {}px;",
            self.direction.flex_direction(),
            self.gap_px
        )
    }
}

/// 세그먼트 레이아웃 계산
///
/// - 그룹 목록이 없거나 비어 있으면 빈 레이아웃
/// - 셀이 없는 그룹은 건너뛴다
/// - 막대 길이는 셀 수 × 45px, 두께는 45px
pub fn layout_segments(
    groups: Option<&[CropGroup]>,
    axis: GroupAxis,
    selected_id: Option<i64>,
) -> GroupLayout {
    let direction = StackDirection::from_axis(axis);
    let segments = groups
        .unwrap_or_default()
        .iter()
        .filter(|group| !group.is_empty())
        .map(|group| {
            let length = group.len() as u32 * CELL_SIZE_PX;
            let (width_px, height_px) = if group.is_horizontal {
                (length, CELL_SIZE_PX)
            } else {
                (CELL_SIZE_PX, length)
            };
            SegmentLayout {
                group_id: group.id,
                crop_type: group.crop_type,
                label: group.crop_type.label(),
                color: group.crop_type.color(),
                cell_count: group.len(),
                width_px,
                height_px,
                vertical_text: !group.is_horizontal,
                selectable: !group.is_path(),
                selected: selected_id == Some(group.id),
            }
        })
        .collect();

    GroupLayout {
        direction,
        gap_px: SEGMENT_GAP_PX,
        segments,
    }
}

/// 응답의 axis가 없으면 첫 그룹의 방향으로 추정
pub fn resolve_axis(axis: Option<GroupAxis>, groups: &[CropGroup]) -> GroupAxis {
    axis.or_else(|| groups.first().map(CropGroup::axis))
        .unwrap_or(GroupAxis::Row)
}
