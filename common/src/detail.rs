//! 그룹 상세 정보 카드

use crate::types::{CropGroup, GroupAxis};

/// 상세 카드 표시용 값 (모두 표시 문자열)
#[derive(Debug, Clone, PartialEq)]
pub struct GroupDetail {
    pub title: String,
    pub line_label: &'static str,   // "행" / "열"
    pub line_number: String,
    pub crop_label: String,
    pub crop_color: &'static str,
    pub length: String,
    pub harvest: String,
    pub total: String,
    pub harvest_ratio: String,
}

impl GroupDetail {
    pub fn new(group: &CropGroup, axis: GroupAxis) -> Self {
        let first = group.group_cells.first();
        let (line_label, index) = match axis {
            GroupAxis::Row => ("행", first.map(|cell| cell[0])),
            GroupAxis::Col => ("열", first.map(|cell| cell[1])),
        };
        let line_number = index
            .map(|i| (i + 1).to_string())
            .unwrap_or_else(|| "-".to_string());

        let length = if group.is_empty() {
            "-".to_string()
        } else {
            group.len().to_string()
        };

        Self {
            title: format!("{}{} 상세 정보", line_number, line_label),
            line_label,
            line_number,
            crop_label: group.crop_type.label(),
            crop_color: group.crop_type.color(),
            length: format!("{}m", length),
            harvest: format!("{}개", optional_count(group.harvest_amount)),
            total: format!("{}개", optional_count(group.total_amount)),
            harvest_ratio: harvest_ratio(group.harvest_amount, group.total_amount),
        }
    }

    /// 라벨/값 쌍 목록 (CLI 출력용)
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("타입", self.crop_label.clone()),
            (self.line_label, self.line_number.clone()),
            ("길이", self.length.clone()),
            ("수확 가능 작물", self.harvest.clone()),
            ("총 작물", self.total.clone()),
            ("수확 가능 비율", self.harvest_ratio.clone()),
        ]
    }
}

fn optional_count(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// 수확 가능 비율 (반올림 %). 전체가 0이거나 값이 없으면 "-"
pub fn harvest_ratio(harvest: Option<u32>, total: Option<u32>) -> String {
    match (harvest, total) {
        (Some(h), Some(t)) if t > 0 => {
            format!("{}%", (f64::from(h) / f64::from(t) * 100.0).round() as i64)
        }
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crop::CropType;

    #[test]
    fn test_row_detail() {
        let group = CropGroup {
            id: 1,
            group_cells: vec![[2, 0], [2, 1], [2, 2]],
            crop_type: CropType::STRAWBERRY,
            is_horizontal: true,
            harvest_amount: Some(2),
            total_amount: Some(3),
        };
        let detail = GroupDetail::new(&group, GroupAxis::Row);
        assert_eq!(detail.title, "3행 상세 정보");
        assert_eq!(detail.crop_label, "딸기");
        assert_eq!(detail.length, "3m");
        assert_eq!(detail.harvest, "2개");
        assert_eq!(detail.harvest_ratio, "67%");
    }

    #[test]
    fn test_col_detail_without_counts() {
        let group = CropGroup {
            id: 4,
            group_cells: vec![[0, 4], [1, 4]],
            crop_type: CropType::TOMATO,
            ..Default::default()
        };
        let detail = GroupDetail::new(&group, GroupAxis::Col);
        assert_eq!(detail.title, "5열 상세 정보");
        assert_eq!(detail.total, "-개");
        assert_eq!(detail.harvest_ratio, "-");
        assert_eq!(detail.rows()[1], ("열", "5".to_string()));
    }

    #[test]
    fn test_harvest_ratio_zero_total() {
        assert_eq!(harvest_ratio(Some(0), Some(0)), "-");
        assert_eq!(harvest_ratio(Some(1), Some(2)), "50%");
        assert_eq!(harvest_ratio(None, Some(2)), "-");
    }
}
