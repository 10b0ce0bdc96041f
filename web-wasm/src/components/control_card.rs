//! 제어 버튼 (촬영 / 업로드 / 수정 / 삭제)

use leptos::prelude::*;

#[component]
pub fn ControlCard(
    #[prop(into)] disabled: Signal<bool>,
    on_capture: Callback<()>,
    on_upload: Callback<()>,
    on_edit: Callback<()>,
    on_delete: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="card control-card">
            <button class="btn" disabled=move || disabled.get() on:click=move |_| on_capture.run(())>
                "📷 IoT 촬영"
            </button>
            <button class="btn" disabled=move || disabled.get() on:click=move |_| on_upload.run(())>
                "🖼️ 이미지 업로드"
            </button>
            <button class="btn" disabled=move || disabled.get() on:click=move |_| on_edit.run(())>
                "✏️ 수정"
            </button>
            <button class="btn btn-danger" disabled=move || disabled.get() on:click=move |_| on_delete.run(())>
                "🗑️ 삭제"
            </button>
        </div>
    }
}
