//! IoT 기기 선택 모달

use leptos::prelude::*;
use smartfarm_common::types::IotDevice;

#[component]
pub fn IotModal(
    #[prop(into)] devices: Signal<Vec<IotDevice>>,
    #[prop(into)] selected: Signal<Option<i64>>,
    #[prop(into)] loading: Signal<bool>,
    on_choose: Callback<i64>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="modal-backdrop">
            <div class="modal iot-modal">
                <h3>"IoT 기기 선택"</h3>
                <Show
                    when=move || !loading.get()
                    fallback=|| view! { <p class="text-muted">"IoT 목록을 불러오는 중..."</p> }
                >
                    <ul class="iot-list">
                        {move || {
                            devices
                                .get()
                                .into_iter()
                                .map(|device| {
                                    let id = device.id;
                                    view! {
                                        <li
                                            class=move || {
                                                if selected.get() == Some(id) { "iot-item selected" } else { "iot-item" }
                                            }
                                            on:click=move |_| on_choose.run(id)
                                        >
                                            {device.name.clone()}
                                        </li>
                                    }
                                })
                                .collect_view()
                        }}
                    </ul>
                </Show>
                <div class="modal-actions">
                    <button
                        class="btn"
                        disabled=move || selected.get().is_none()
                        on:click=move |_| on_confirm.run(())
                    >
                        "확인"
                    </button>
                    <button class="btn btn-secondary" on:click=move |_| on_cancel.run(())>"취소"</button>
                </div>
            </div>
        </div>
    }
}
