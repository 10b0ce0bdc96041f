//! 그리드 편집기
//!
//! 셀마다 작물 코드 선택. 저장 전 서버가 다시 만들 그룹 수를 미리 보여준다.

use leptos::prelude::*;
use smartfarm_common::crop::CROP_TABLE;
use smartfarm_common::grid::Grid;

#[component]
pub fn GridEditor(
    #[prop(into)] draft: Signal<Option<Grid>>,
    #[prop(into)] preview: Signal<String>,
    #[prop(into)] saving: Signal<bool>,
    on_cell: Callback<(usize, usize, String)>,
    on_save: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="card grid-editor">
            <h3>"그리드 수정"</h3>
            <table class="grid-table">
                <tbody>
                    {move || {
                        draft
                            .get()
                            .unwrap_or_default()
                            .into_iter()
                            .enumerate()
                            .map(|(r, row)| {
                                view! {
                                    <tr>
                                        {row
                                            .into_iter()
                                            .enumerate()
                                            .map(|(c, value)| view! { <GridCell row=r col=c value=value on_cell=on_cell /> })
                                            .collect_view()}
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
            <p class="text-muted">{move || preview.get()}</p>
            <div class="modal-actions">
                <button class="btn" disabled=move || saving.get() on:click=move |_| on_save.run(())>
                    {move || if saving.get() { "저장 중..." } else { "저장" }}
                </button>
                <button
                    class="btn btn-secondary"
                    disabled=move || saving.get()
                    on:click=move |_| on_cancel.run(())
                >
                    "취소"
                </button>
            </div>
        </div>
    }
}

#[component]
fn GridCell(row: usize, col: usize, value: i64, on_cell: Callback<(usize, usize, String)>) -> impl IntoView {
    let cell_style = format!(
        "background-color: {}",
        smartfarm_common::CropType(value).color()
    );

    view! {
        <td style=cell_style>
            <select on:change=move |ev| on_cell.run((row, col, event_target_value(&ev)))>
                {CROP_TABLE
                    .iter()
                    .map(|info| {
                        view! {
                            <option value=info.code.to_string() selected=info.code == value>
                                {info.label}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </td>
    }
}
