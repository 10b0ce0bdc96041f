use anyhow::{bail, Context, Result};
use smartfarm_common::grid::{parse_grid_data, Grid};
use std::fs;
use std::path::Path;

/// 그리드 JSON 파일 읽기
///
/// 배열(`[[0,1],[1,1]]`) 또는 배열을 담은 문자열 모두 허용한다.
/// 행 길이가 다르면 거부.
pub fn load_grid_file(path: &Path) -> Result<Grid> {
    let content = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&content).with_context(|| format!("parse {}", path.display()))?;
    let Some(grid) = parse_grid_data(&value) else {
        bail!("{}: 정수 2차원 배열이 아닙니다", path.display());
    };
    if grid.is_empty() {
        bail!("{}: 빈 그리드", path.display());
    }
    let cols = grid[0].len();
    if grid.iter().any(|row| row.len() != cols) {
        bail!("{}: 행마다 열 수가 다릅니다", path.display());
    }
    Ok(grid)
}

pub fn save_json(path: &Path, value: &serde_json::Value) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
