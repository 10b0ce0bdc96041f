//! 작물 그룹 막대
//!
//! [`GroupLayout`]을 그대로 `<div>`로 그린다. 길(코드 0) 막대는 클릭해도 아무 일도 없다.

use leptos::prelude::*;
use smartfarm_common::layout::GroupLayout;

#[component]
pub fn GroupBars(
    #[prop(into)] layout: Signal<GroupLayout>,
    on_select: Callback<i64>,
) -> impl IntoView {
    view! {
        <div class="merged-bar-container" style=move || layout.with(|l| l.container_style())>
            {move || {
                layout
                    .get()
                    .segments
                    .into_iter()
                    .map(|segment| {
                        let id = segment.group_id;
                        let selectable = segment.selectable;
                        view! {
                            <div
                                class=segment.css_class()
                                style=segment.style()
                                title=segment.label.clone()
                                on:click=move |_| {
                                    if selectable {
                                        on_select.run(id);
                                    }
                                }
                            >
                                <span class="bar-label">{segment.label.clone()}</span>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
