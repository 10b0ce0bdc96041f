//! 비닐하우스 그리드
//!
//! - grid_data 파싱 (네이티브 JSON 배열 또는 JSON 문자열)
//! - 그리드로부터 작물 그룹 생성 (서버와 같은 규칙)
//! - 그리드 편집 모드 (Viewing / Editing)

use crate::crop::CropType;
use crate::error::{Error, Result};
use crate::types::GroupAxis;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 행 × 열 작물 코드 배열
pub type Grid = Vec<Vec<i64>>;

/// `GET /api/greenhouses/api/grid` 응답
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GridResponse {
    pub grid_data: Value,
    pub num_rows: usize,
    pub num_cols: usize,
}

impl GridResponse {
    /// 파싱된 그리드. 파싱할 수 없으면 None (그리드 미설정 상태로 둔다)
    pub fn grid(&self) -> Option<Grid> {
        parse_grid_data(&self.grid_data)
    }
}

/// grid_data 값을 그리드로 변환
///
/// 서버는 grid_data를 배열로 주기도 하고 JSON 인코딩된 문자열로 주기도 한다.
/// 두 경우 모두 같은 구조로 파싱하며, 잘못된 문자열은 에러 대신 None을 반환한다.
///
/// # Examples
/// ```
/// use smartfarm_common::grid::parse_grid_data;
///
/// let value = serde_json::json!("[[0,1],[1,0]]");
/// assert_eq!(parse_grid_data(&value), Some(vec![vec![0, 1], vec![1, 0]]));
/// ```
pub fn parse_grid_data(value: &Value) -> Option<Grid> {
    match value {
        Value::String(encoded) => serde_json::from_str::<Grid>(encoded).ok(),
        Value::Array(_) => serde_json::from_value::<Grid>(value.clone()).ok(),
        _ => None,
    }
}

/// 한 줄에서 같은 값이 연속되는 구간 (start, end, value). end 포함
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
    pub value: i64,
}

impl Segment {
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

/// 연속 구간 분리
pub fn find_segments(line: &[i64]) -> Vec<Segment> {
    let Some(&first) = line.first() else {
        return Vec::new();
    };

    let mut segments = Vec::new();
    let mut start = 0;
    let mut value = first;

    for (i, &cell) in line.iter().enumerate().skip(1) {
        if cell != value {
            segments.push(Segment { start, end: i - 1, value });
            start = i;
            value = cell;
        }
    }
    segments.push(Segment { start, end: line.len() - 1, value });

    segments
}

/// 그리드에서 생성한 그룹 (서버 저장 전 미리보기용)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupPreview {
    pub cells: Vec<[usize; 2]>,
    pub crop_type: CropType,
    pub is_horizontal: bool,
}

/// 그룹 방향 결정: 첫 행이 모두 같은 값이면 가로, 아니면 세로
pub fn choose_axis(grid: &Grid) -> GroupAxis {
    match grid.first() {
        Some(first_row) if first_row.iter().all(|&v| Some(&v) == first_row.first()) => {
            GroupAxis::Row
        }
        Some(_) => GroupAxis::Col,
        None => GroupAxis::Row,
    }
}

/// 행 방향 그룹 (길이 2 이상인 구간만)
pub fn row_groups(grid: &Grid) -> Vec<GroupPreview> {
    let mut groups = Vec::new();
    for (row_idx, row) in grid.iter().enumerate() {
        for seg in find_segments(row) {
            if seg.end > seg.start {
                groups.push(GroupPreview {
                    cells: (seg.start..=seg.end).map(|col| [row_idx, col]).collect(),
                    crop_type: CropType(seg.value),
                    is_horizontal: true,
                });
            }
        }
    }
    groups
}

/// 열 방향 그룹 (길이 2 이상인 구간만)
pub fn col_groups(grid: &Grid) -> Vec<GroupPreview> {
    let num_cols = grid.first().map(|row| row.len()).unwrap_or(0);
    let mut groups = Vec::new();
    for col_idx in 0..num_cols {
        // 짧은 행은 해당 열에서 제외
        let column: Vec<i64> = grid.iter().filter_map(|row| row.get(col_idx).copied()).collect();
        for seg in find_segments(&column) {
            if seg.end > seg.start {
                groups.push(GroupPreview {
                    cells: (seg.start..=seg.end).map(|row| [row, col_idx]).collect(),
                    crop_type: CropType(seg.value),
                    is_horizontal: false,
                });
            }
        }
    }
    groups
}

/// 서버가 그리드 저장 시 재생성하는 그룹을 계산
pub fn compute_groups(grid: &Grid) -> (GroupAxis, Vec<GroupPreview>) {
    let axis = choose_axis(grid);
    let groups = match axis {
        GroupAxis::Row => row_groups(grid),
        GroupAxis::Col => col_groups(grid),
    };
    (axis, groups)
}

/// `POST /api/greenhouses/update/{id}` 요청 본문
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateGreenhouseRequest {
    pub name: String,
    pub num_rows: usize,
    pub num_cols: usize,
    pub grid_data: Grid,
}

/// 그리드 편집 모드
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditMode {
    #[default]
    Viewing,
    Editing {
        draft: Grid,
        saving: bool,
    },
}

impl EditMode {
    /// 현재 그리드를 복사해 편집 시작
    pub fn begin(&mut self, grid: &Grid) {
        *self = EditMode::Editing {
            draft: grid.clone(),
            saving: false,
        };
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, EditMode::Editing { .. })
    }

    pub fn draft(&self) -> Option<&Grid> {
        match self {
            EditMode::Editing { draft, .. } => Some(draft),
            EditMode::Viewing => None,
        }
    }

    /// 셀 값 변경. 작물 코드 범위를 벗어나면 에러
    pub fn set_cell(&mut self, row: usize, col: usize, value: i64) -> Result<()> {
        let EditMode::Editing { draft, saving: false } = self else {
            return Err(Error::Parse("편집 중이 아닙니다".into()));
        };
        if !CropType::is_editable_code(value) {
            return Err(Error::InvalidCell { row, col, value });
        }
        let cell = draft
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(Error::InvalidCell { row, col, value })?;
        *cell = value;
        Ok(())
    }

    /// 입력 문자열로 셀 변경 (숫자 입력 필드용)
    pub fn set_cell_from_input(&mut self, row: usize, col: usize, input: &str) -> Result<()> {
        let value: i64 = input
            .trim()
            .parse()
            .map_err(|_| Error::Parse(format!("숫자가 아닙니다: {}", input)))?;
        self.set_cell(row, col, value)
    }

    /// 저장 요청 생성. 이후 `finish_save`로 완료 처리
    pub fn save_request(&mut self, name: &str, num_rows: usize, num_cols: usize) -> Option<UpdateGreenhouseRequest> {
        let EditMode::Editing { draft, saving } = self else {
            return None;
        };
        if *saving {
            return None;
        }
        *saving = true;
        Some(UpdateGreenhouseRequest {
            name: name.to_string(),
            num_rows,
            num_cols,
            grid_data: draft.clone(),
        })
    }

    /// 저장 완료: 편집본을 반환하고 Viewing으로 복귀
    pub fn finish_save(&mut self) -> Option<Grid> {
        match std::mem::take(self) {
            EditMode::Editing { draft, saving: true } => Some(draft),
            other => {
                *self = other;
                None
            }
        }
    }

    /// 저장 실패: 편집 상태 유지
    pub fn save_failed(&mut self) {
        if let EditMode::Editing { saving, .. } = self {
            *saving = false;
        }
    }

    /// 편집 취소: 편집본 폐기
    pub fn cancel(&mut self) {
        *self = EditMode::Viewing;
    }

    /// 편집본 기준 그룹 미리보기
    pub fn preview(&self) -> Option<(GroupAxis, Vec<GroupPreview>)> {
        self.draft().map(compute_groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // =============================================
    // grid_data 파싱
    // =============================================

    #[test]
    fn test_parse_grid_from_string() {
        let response: GridResponse = serde_json::from_value(json!({
            "grid_data": "[[0,1],[1,0]]",
            "num_rows": 2,
            "num_cols": 2
        }))
        .expect("역직렬화 실패");
        assert_eq!(response.grid(), Some(vec![vec![0, 1], vec![1, 0]]));
        assert_eq!(response.num_rows, 2);
    }

    #[test]
    fn test_parse_grid_string_and_native_equal() {
        let native = json!([[1, 1, 0], [2, 2, 0]]);
        let encoded = json!("[[1, 1, 0], [2, 2, 0]]");
        assert_eq!(parse_grid_data(&native), parse_grid_data(&encoded));
        assert!(parse_grid_data(&native).is_some());
    }

    #[test]
    fn test_parse_grid_malformed_string() {
        assert_eq!(parse_grid_data(&json!("[[0,1],[1,")), None);
        assert_eq!(parse_grid_data(&json!("not json")), None);
        assert_eq!(parse_grid_data(&Value::Null), None);
    }

    // =============================================
    // 그룹 생성
    // =============================================

    #[test]
    fn test_find_segments() {
        let segments = find_segments(&[1, 1, 0, 2, 2, 2]);
        assert_eq!(
            segments,
            vec![
                Segment { start: 0, end: 1, value: 1 },
                Segment { start: 2, end: 2, value: 0 },
                Segment { start: 3, end: 5, value: 2 },
            ]
        );
        assert_eq!(segments[2].len(), 3);
        assert!(find_segments(&[]).is_empty());
    }

    #[test]
    fn test_choose_axis() {
        assert_eq!(choose_axis(&vec![vec![0, 0, 0], vec![1, 1, 1]]), GroupAxis::Row);
        assert_eq!(choose_axis(&vec![vec![1, 0, 2], vec![1, 0, 2]]), GroupAxis::Col);
    }

    #[test]
    fn test_row_groups_skip_single_cells() {
        let grid = vec![vec![0, 0, 0], vec![1, 1, 2]];
        let (axis, groups) = compute_groups(&grid);
        assert_eq!(axis, GroupAxis::Row);
        // [1,2] 단일 셀 구간은 제외
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].cells, vec![[0, 0], [0, 1], [0, 2]]);
        assert_eq!(groups[1].cells, vec![[1, 0], [1, 1]]);
        assert_eq!(groups[1].crop_type, CropType::STRAWBERRY);
        assert!(groups.iter().all(|g| g.is_horizontal));
    }

    #[test]
    fn test_col_groups() {
        let grid = vec![vec![1, 0, 2], vec![1, 0, 2], vec![1, 0, 1]];
        let (axis, groups) = compute_groups(&grid);
        assert_eq!(axis, GroupAxis::Col);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].cells, vec![[0, 0], [1, 0], [2, 0]]);
        assert_eq!(groups[2].cells, vec![[0, 2], [1, 2]]);
        assert_eq!(groups[2].crop_type, CropType::TOMATO);
        assert!(groups.iter().all(|g| !g.is_horizontal));
    }

    #[test]
    fn test_groups_are_contiguous() {
        let grid = vec![vec![1, 2, 1], vec![1, 2, 2], vec![2, 2, 1]];
        let (_, groups) = compute_groups(&grid);
        for group in groups {
            assert!(!group.cells.is_empty());
            for pair in group.cells.windows(2) {
                assert_eq!(pair[1][0] - pair[0][0] + pair[1][1] - pair[0][1], 1);
            }
        }
    }

    #[test]
    fn test_compute_groups_empty() {
        let (_, groups) = compute_groups(&Vec::new());
        assert!(groups.is_empty());
    }

    // =============================================
    // 편집 모드
    // =============================================

    #[test]
    fn test_edit_save_cycle() {
        let grid = vec![vec![0, 1], vec![1, 0]];
        let mut mode = EditMode::default();
        mode.begin(&grid);
        mode.set_cell(0, 0, 2).expect("셀 변경 실패");

        let request = mode.save_request("A동", 2, 2).expect("저장 요청 없음");
        assert_eq!(request.grid_data, vec![vec![2, 1], vec![1, 0]]);
        assert_eq!(request.name, "A동");

        // 저장 중에는 중복 요청 불가
        assert!(mode.save_request("A동", 2, 2).is_none());

        let saved = mode.finish_save().expect("편집본 없음");
        assert_eq!(saved, vec![vec![2, 1], vec![1, 0]]);
        assert_eq!(mode, EditMode::Viewing);
    }

    #[test]
    fn test_edit_rejects_out_of_range() {
        let mut mode = EditMode::default();
        mode.begin(&vec![vec![0]]);
        assert!(matches!(mode.set_cell(0, 0, 3), Err(Error::InvalidCell { value: 3, .. })));
        assert!(mode.set_cell(5, 0, 1).is_err());
        assert!(mode.set_cell_from_input(0, 0, "abc").is_err());
        mode.set_cell_from_input(0, 0, " 2 ").expect("입력 변경 실패");
        assert_eq!(mode.draft(), Some(&vec![vec![2]]));
    }

    #[test]
    fn test_edit_cancel_discards_draft() {
        let grid = vec![vec![1, 1]];
        let mut mode = EditMode::default();
        mode.begin(&grid);
        mode.set_cell(0, 1, 0).expect("셀 변경 실패");
        mode.cancel();
        assert!(!mode.is_editing());
        assert!(mode.finish_save().is_none());
    }

    #[test]
    fn test_edit_save_failed_keeps_draft() {
        let mut mode = EditMode::default();
        mode.begin(&vec![vec![1, 1]]);
        mode.save_request("B동", 1, 2).expect("저장 요청 없음");
        mode.save_failed();
        assert!(mode.is_editing());
        mode.set_cell(0, 0, 2).expect("저장 실패 후 편집 불가");
    }

    #[test]
    fn test_edit_preview() {
        let mut mode = EditMode::default();
        assert!(mode.preview().is_none());
        mode.begin(&vec![vec![2, 2, 2]]);
        let (axis, groups) = mode.preview().expect("미리보기 없음");
        assert_eq!(axis, GroupAxis::Row);
        assert_eq!(groups.len(), 1);
    }
}
