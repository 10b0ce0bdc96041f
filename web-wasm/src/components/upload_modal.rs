//! 이미지 업로드 분석 모달

use super::group_bars::GroupBars;
use super::upload_area::UploadArea;
use leptos::prelude::*;
use smartfarm_common::layout::GroupLayout;
use smartfarm_common::types::UploadAnalysis;
use web_sys::File;

#[component]
pub fn UploadModal(
    #[prop(into)] layout: Signal<GroupLayout>,
    #[prop(into)] file_names: Signal<Vec<String>>,
    #[prop(into)] uploading: Signal<bool>,
    on_select: Callback<i64>,
    on_files: Callback<Vec<File>>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="modal-backdrop">
            <div class="modal upload-modal">
                <h3>"이미지 업로드 분석"</h3>
                <p class="text-muted">"분석할 영역을 선택하고 이미지를 올려주세요."</p>
                <GroupBars layout=layout on_select=on_select />
                <UploadArea disabled=uploading file_names=file_names on_files=on_files />
                <div class="modal-actions">
                    <button
                        class="btn"
                        disabled=move || uploading.get()
                        on:click=move |_| on_confirm.run(())
                    >
                        {move || if uploading.get() { "분석 중..." } else { "분석 시작" }}
                    </button>
                    <button
                        class="btn btn-secondary"
                        disabled=move || uploading.get()
                        on:click=move |_| on_cancel.run(())
                    >
                        "취소"
                    </button>
                </div>
            </div>
        </div>
    }
}

/// 업로드 분석 결과 요약
#[component]
pub fn UploadSummary(analysis: UploadAnalysis) -> impl IntoView {
    let rotten_style = if analysis.rotten_found() { "color: red" } else { "" };

    view! {
        <div class="card upload-result">
            <h4>"분석 결과"</h4>
            <ul>
                <li>{format!("총 파일: {}개", analysis.total_files)}</li>
                <li>{format!("익은 딸기: {}개", analysis.total_ripe)}</li>
                <li>{format!("안익은 딸기: {}개", analysis.total_unripe)}</li>
                <li>{format!("전체 딸기: {}개", analysis.total_count)}</li>
                <li style=rotten_style>{format!("썩은 딸기: {}", analysis.has_rotten)}</li>
            </ul>
        </div>
    }
}
