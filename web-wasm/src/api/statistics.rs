//! 시세 통계 API

use super::fetch::get_json;
use crate::config::ApiConfig;
use smartfarm_common::api::Route;
use smartfarm_common::statistics::{GraphKind, StatisticsResponse, YearSelection, MSG_STATISTICS_FAILED};

/// 그래프 데이터 조회. plot_json 파싱까지 성공해야 Ok
pub async fn fetch_statistics(
    config: &ApiConfig,
    graph: GraphKind,
    years: &YearSelection,
) -> Result<(String, serde_json::Value), String> {
    let response: StatisticsResponse = get_json(config, &Route::statistics(graph, years))
        .await
        .map_err(|_| MSG_STATISTICS_FAILED.to_string())?;
    let plot = response.plot().map_err(|e| {
        log::warn!("plot_json 파싱 실패: {}", e);
        MSG_STATISTICS_FAILED.to_string()
    })?;
    Ok((response.graph_title, plot))
}
