//! 에러 타입 정의

use thiserror::Error;

/// 공통 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Invalid cell ({row}, {col}): {value}")]
    InvalidCell { row: usize, col: usize, value: i64 },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = Error::Json(json_error);
        assert!(format!("{}", error).contains("JSON error"));
    }

    #[test]
    fn test_error_display_http() {
        let error = Error::Http {
            status: 404,
            message: "존재하지 않는 비닐하우스입니다.".to_string(),
        };
        assert_eq!(format!("{}", error), "HTTP 404: 존재하지 않는 비닐하우스입니다.");
    }

    #[test]
    fn test_error_display_invalid_cell() {
        let error = Error::InvalidCell { row: 1, col: 2, value: 7 };
        assert_eq!(format!("{}", error), "Invalid cell (1, 2): 7");
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::Config("테스트".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Config"));
        assert!(debug.contains("테스트"));
    }
}
