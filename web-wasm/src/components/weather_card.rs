//! 오늘의 날씨 / 이틀 예보

use leptos::prelude::*;
use smartfarm_common::text::weather_icon;
use smartfarm_common::types::WeatherReport;

#[component]
pub fn WeatherCard(#[prop(into)] report: Signal<Option<WeatherReport>>) -> impl IntoView {
    view! {
        <div class="card weather-card">
            <h3>"오늘의 날씨"</h3>
            {move || {
                let report = report.get().unwrap_or_default();
                let today = report.weather.clone().unwrap_or_default();
                let temperature = today
                    .temperature
                    .map(|t| format!("{}°C", t))
                    .unwrap_or_else(|| "-".to_string());
                let description = today.description.clone().unwrap_or_default();
                let icon = weather_icon(today.description.as_deref()).unwrap_or_default();
                let has_forecast = report.has_forecast();
                let days = report.two_day;

                view! {
                    <div class="weather-today">
                        <span class="weather-icon">{icon}</span>
                        <span class="weather-temp">{temperature}</span>
                        <span class="weather-desc">{description}</span>
                    </div>
                    <h4>"내일/모레 예보"</h4>
                    <div class="weather-forecast">
                        {if has_forecast {
                            days.into_iter()
                                .map(|day| {
                                    let icon = weather_icon(Some(day.description.as_str())).unwrap_or_default();
                                    view! {
                                        <div class="forecast-day">
                                            <span class="forecast-date">{day.date.clone()}</span>
                                            <span>{day.temperature_range()}</span>
                                            <span>{format!("{} {}", day.description, icon)}</span>
                                        </div>
                                    }
                                })
                                .collect_view()
                                .into_any()
                        } else {
                            view! {
                                <div class="forecast-day">"내일 예보 없음"</div>
                                <div class="forecast-day">"모레 예보 없음"</div>
                            }
                            .into_any()
                        }}
                    </div>
                }
            }}
        </div>
    }
}
