//! 작물 타입 코드 매핑
//!
//! 그리드 셀에 저장되는 정수 코드와 화면 표시용 라벨/색상의 정적 테이블.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 작물 코드별 표시 정보
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropInfo {
    pub code: i64,
    pub label: &'static str,
    pub color: &'static str,
}

/// 코드 → 라벨/색상 테이블
pub const CROP_TABLE: &[CropInfo] = &[
    CropInfo { code: 0, label: "길", color: "#F9F7E8" },
    CropInfo { code: 1, label: "딸기", color: "#FF8B8B" },
    CropInfo { code: 2, label: "토마토", color: "#61BFAD" },
];

/// 테이블에 없는 코드의 색상
pub const UNKNOWN_CROP_COLOR: &str = "#333";

/// 그리드 셀의 작물 타입 코드
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CropType(pub i64);

impl CropType {
    pub const PATH: CropType = CropType(0);
    pub const STRAWBERRY: CropType = CropType(1);
    pub const TOMATO: CropType = CropType(2);

    /// 편집 가능한 코드 범위
    pub const MIN_CODE: i64 = 0;
    pub const MAX_CODE: i64 = 2;

    pub fn code(self) -> i64 {
        self.0
    }

    /// 길(통로)인지 여부. 길은 촬영/업로드 대상으로 선택할 수 없다.
    pub fn is_path(self) -> bool {
        self == Self::PATH
    }

    pub fn info(self) -> Option<&'static CropInfo> {
        CROP_TABLE.iter().find(|info| info.code == self.0)
    }

    /// 표시 라벨. 알 수 없는 코드는 코드 값을 그대로 표시
    pub fn label(self) -> String {
        match self.info() {
            Some(info) => info.label.to_string(),
            None => self.0.to_string(),
        }
    }

    pub fn color(self) -> &'static str {
        self.info().map(|info| info.color).unwrap_or(UNKNOWN_CROP_COLOR)
    }

    /// 편집 모드에서 허용되는 코드인지 확인
    pub fn is_editable_code(value: i64) -> bool {
        (Self::MIN_CODE..=Self::MAX_CODE).contains(&value)
    }
}

impl From<i64> for CropType {
    fn from(code: i64) -> Self {
        CropType(code)
    }
}

impl fmt::Display for CropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
