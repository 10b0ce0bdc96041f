//! REST API 호출 (web-sys fetch)

pub mod encyclopedia;
pub mod farm;
pub mod fetch;
pub mod statistics;
