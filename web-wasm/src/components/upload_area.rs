//! 이미지 선택 영역 (드래그&드롭 또는 클릭)

use leptos::html::Input;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, File, FileList, HtmlInputElement};

#[component]
pub fn UploadArea(
    #[prop(into)] disabled: Signal<bool>,
    #[prop(into)] file_names: Signal<Vec<String>>,
    on_files: Callback<Vec<File>>,
) -> impl IntoView {
    let (is_dragover, set_is_dragover) = signal(false);
    let input_ref = NodeRef::<Input>::new();

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(false);
        if disabled.get_untracked() {
            return;
        }
        if let Some(files) = ev.data_transfer().and_then(|dt| dt.files()) {
            on_files.run(collect_images(&files));
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        if !disabled.get_untracked() {
            set_is_dragover.set(true);
        }
    };

    let on_click = move |_| {
        if disabled.get_untracked() {
            return;
        }
        // 숨겨진 파일 입력 열기
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let on_change = move |ev: web_sys::Event| {
        let files = ev
            .target()
            .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
            .and_then(|input| input.files());
        if let Some(files) = files {
            on_files.run(collect_images(&files));
        }
    };

    view! {
        <div
            class=move || {
                let mut classes = vec!["upload-area"];
                if is_dragover.get() {
                    classes.push("dragover");
                }
                if disabled.get() {
                    classes.push("disabled");
                }
                classes.join(" ")
            }
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=move |_: DragEvent| set_is_dragover.set(false)
            on:click=on_click
        >
            <input
                node_ref=input_ref
                type="file"
                accept="image/*"
                multiple=true
                style="display: none"
                on:change=on_change
            />
            <div class="upload-icon">"📷"</div>
            {move || {
                let names = file_names.get();
                if names.is_empty() {
                    view! { <p>"이미지를 드래그&드롭 또는 클릭해서 선택"</p> }.into_any()
                } else {
                    view! {
                        <p>{format!("{}개 파일 선택됨", names.len())}</p>
                        <ul class="file-names">
                            {names.into_iter().map(|name| view! { <li>{name}</li> }).collect_view()}
                        </ul>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}

/// 이미지 파일만 추린다
fn collect_images(files: &FileList) -> Vec<File> {
    (0..files.length())
        .filter_map(|i| files.get(i))
        .filter(|file| is_image_type(&file.type_()))
        .collect()
}

/// MIME 타입이 비어 있으면(브라우저가 판별 못 함) 통과시킨다
pub fn is_image_type(mime: &str) -> bool {
    mime.is_empty() || mime.starts_with("image/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image_type() {
        assert!(is_image_type("image/jpeg"));
        assert!(is_image_type("image/png"));
        assert!(is_image_type(""));
        assert!(!is_image_type("application/pdf"));
    }
}
