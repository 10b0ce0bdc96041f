//! JavaScript Bridge 바인딩
//!
//! 통계 그래프는 Plotly(JS)로 그린다. Rust 쪽은 figure JSON만 넘긴다.

use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/js/plotly-bridge.js")]
extern "C" {
    /// figure(JSON 문자열)를 지정한 요소에 렌더링
    #[wasm_bindgen(js_name = "renderPlot", catch)]
    async fn render_plot_js(element_id: &str, figure_json: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = "purgePlot")]
    fn purge_plot_js(element_id: &str);
}

/// 그래프 렌더링
pub async fn render_plot(element_id: &str, figure: &serde_json::Value) -> Result<(), String> {
    let json = figure_to_json(figure)?;
    render_plot_js(element_id, &json)
        .await
        .map(|_| ())
        .map_err(|e| format!("그래프 렌더링 실패: {:?}", e))
}

pub fn purge_plot(element_id: &str) {
    purge_plot_js(element_id);
}

/// figure 값을 JS로 넘길 JSON 문자열로 변환 (data/layout 누락 시 빈 값으로 채움)
pub fn figure_to_json(figure: &serde_json::Value) -> Result<String, String> {
    let mut figure = figure.clone();
    let obj = figure
        .as_object_mut()
        .ok_or_else(|| "figure가 객체가 아닙니다".to_string())?;
    obj.entry("data").or_insert_with(|| serde_json::json!([]));
    obj.entry("layout").or_insert_with(|| serde_json::json!({}));
    serde_json::to_string(&figure).map_err(|e| format!("JSON serialization failed: {}", e))
}
