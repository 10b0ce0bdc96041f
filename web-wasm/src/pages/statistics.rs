//! 시세 통계 (`/statistics`)

use crate::api::statistics::fetch_statistics;
use crate::bridge::{purge_plot, render_plot};
use crate::config::use_api_config;
use leptos::prelude::*;
use leptos::task::spawn_local;
use smartfarm_common::sequence::RequestSequencer;
use smartfarm_common::statistics::{years, GraphKind, YearSelection};

const PLOT_ELEMENT_ID: &str = "statistics-plot";

#[component]
pub fn StatisticsPage() -> impl IntoView {
    let config = use_api_config();

    let graph = RwSignal::new(GraphKind::default());
    let selection = RwSignal::new(YearSelection::default());
    let title = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);
    let sequencer = StoredValue::new(RequestSequencer::new());

    Effect::new(move |_| {
        let graph = graph.get();
        let years = selection.get();
        let ticket = sequencer.with_value(|s| s.issue());
        loading.set(true);
        let config = config.clone();
        spawn_local(async move {
            let result = fetch_statistics(&config, graph, &years).await;
            // 그래프/연도를 빠르게 바꾸면 마지막 요청만 반영
            if !sequencer.with_value(|s| s.is_current(ticket)) {
                return;
            }
            match result {
                Ok((graph_title, plot)) => {
                    error.set(None);
                    title.set(graph_title);
                    if let Err(e) = render_plot(PLOT_ELEMENT_ID, &plot).await {
                        log::error!("{}", e);
                        error.set(Some(e));
                    }
                }
                Err(message) => {
                    purge_plot(PLOT_ELEMENT_ID);
                    title.set(String::new());
                    error.set(Some(message));
                }
            }
            loading.set(false);
        });
    });

    on_cleanup(|| purge_plot(PLOT_ELEMENT_ID));

    let graph_buttons = GraphKind::ALL
        .into_iter()
        .map(|kind| view! {
            <li>
                <button
                    class="graph-button"
                    class:active=move || graph.get() == kind
                    on:click=move |_| graph.set(kind)
                >
                    {kind.label()}
                </button>
            </li>
        })
        .collect_view();

    let year_select = move || {
        graph.get().year_param().map(|param| {
            let options = years()
                .map(|year| view! {
                    <option value=year.to_string() selected=move || selection.with(|s| s.get(param) == year)>
                        {year.to_string()}
                    </option>
                })
                .collect_view();
            view! {
                <label class="year-select">
                    {param.label()}
                    <select on:change=move |ev| {
                        if let Ok(year) = event_target_value(&ev).parse::<u16>() {
                            selection.update(|s| {
                                s.set(param, year);
                            });
                        }
                    }>
                        {options}
                    </select>
                </label>
            }
        })
    };

    view! {
        <div class="statistics">
            <aside class="graph-sidebar">
                <h2>"시세 통계"</h2>
                <ul>{graph_buttons}</ul>
            </aside>
            <main class="graph-main">
                {year_select}
                <h1 class="graph-title">{move || title.get()}</h1>
                <Show when=move || loading.get()>
                    <p class="loading-text">"로딩 중..."</p>
                </Show>
                {move || error.get().map(|message| view! { <p class="error-text">{message}</p> })}
                <div id=PLOT_ELEMENT_ID class="plot-area"></div>
            </main>
        </div>
    }
}
