//! 비닐하우스 목록 사이드바

use leptos::prelude::*;
use smartfarm_common::types::GreenhouseSummary;

#[component]
pub fn Sidebar(
    farm_id: i64,
    #[prop(into)] greenhouses: Signal<Vec<GreenhouseSummary>>,
    #[prop(into)] selected_id: Signal<Option<i64>>,
    open: RwSignal<bool>,
    on_select: Callback<GreenhouseSummary>,
) -> impl IntoView {
    let add_href = format!("/greenhouse-grid/{}", farm_id);

    view! {
        <aside class=move || if open.get() { "sidebar open" } else { "sidebar closed" }>
            <button class="sidebar-toggle" on:click=move |_| open.update(|o| *o = !*o)>
                {move || if open.get() { "◀" } else { "▶" }}
            </button>
            <Show when=move || open.get()>
                <h3>"비닐하우스 목록"</h3>
                <ul class="greenhouse-list">
                    {move || {
                        let list = greenhouses.get();
                        if list.is_empty() {
                            return view! { <li class="empty">"등록된 비닐하우스가 없습니다."</li> }
                                .into_any();
                        }
                        list.into_iter()
                            .map(|gh| {
                                let id = gh.id;
                                let name = gh.name.clone();
                                view! {
                                    <li
                                        class=move || {
                                            if selected_id.get() == Some(id) { "active" } else { "" }
                                        }
                                        on:click=move |_| on_select.run(gh.clone())
                                    >
                                        {name}
                                    </li>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }}
                </ul>
                <a class="add-greenhouse" href=add_href.clone()>"+ 비닐하우스 추가"</a>
            </Show>
        </aside>
    }
}
