//! 스마트팜 비닐하우스 작업 클라이언트 (CLI)

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod io;
pub mod render;
pub mod scanner;
pub mod workspace;
