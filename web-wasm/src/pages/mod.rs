//! 라우트별 화면

pub mod crop;
pub mod entry;
pub mod farm;
pub mod statistics;
