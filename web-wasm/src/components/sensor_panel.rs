//! 하우스 환경 패널 (온도 / 습도 / 측정 시간)

use leptos::prelude::*;
use smartfarm_common::types::SensorStatus;

#[component]
pub fn SensorPanel(
    #[prop(into)] status: Signal<SensorStatus>,
    #[prop(into)] loading: Signal<bool>,
) -> impl IntoView {
    view! {
        <div class="card sensor-panel">
            <h3>"하우스 환경"</h3>
            {move || {
                if loading.get() {
                    return view! { <p class="text-muted">"로딩 중..."</p> }.into_any();
                }
                match status.get() {
                    SensorStatus::Reading { temperature, humidity, timestamp } => view! {
                        <ul class="sensor-values">
                            <li>{format!("온도: {}°C", temperature)}</li>
                            <li>{format!("습도: {}%", humidity)}</li>
                            <li class="text-muted">{format!("측정 시간: {}", timestamp)}</li>
                        </ul>
                    }
                    .into_any(),
                    SensorStatus::Unavailable(message) => {
                        view! { <p class="text-muted">{message}</p> }.into_any()
                    }
                }
            }}
        </div>
    }
}
