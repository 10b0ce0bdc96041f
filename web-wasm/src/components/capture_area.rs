//! 촬영 영역 선택 카드

use super::group_bars::GroupBars;
use leptos::prelude::*;
use smartfarm_common::layout::GroupLayout;

#[component]
pub fn CaptureArea(
    device_name: String,
    #[prop(into)] layout: Signal<GroupLayout>,
    #[prop(into)] has_target: Signal<bool>,
    #[prop(into)] submitting: Signal<bool>,
    on_select: Callback<i64>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="modal-backdrop">
            <div class="modal capture-area-card">
                <h3>"촬영할 영역을 선택하세요"</h3>
                <p class="text-muted">{format!("IoT: {}", device_name)}</p>
                <GroupBars layout=layout on_select=on_select />
                <div class="modal-actions">
                    <button
                        class="btn"
                        disabled=move || !has_target.get() || submitting.get()
                        on:click=move |_| on_confirm.run(())
                    >
                        {move || if submitting.get() { "전송 중..." } else { "촬영" }}
                    </button>
                    <button
                        class="btn btn-secondary"
                        disabled=move || submitting.get()
                        on:click=move |_| on_cancel.run(())
                    >
                        "취소"
                    </button>
                </div>
            </div>
        </div>
    }
}
