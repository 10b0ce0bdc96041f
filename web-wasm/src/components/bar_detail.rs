//! 그룹 상세 정보 카드

use leptos::prelude::*;
use smartfarm_common::detail::GroupDetail;

#[component]
pub fn BarDetail(detail: GroupDetail, on_back: Callback<()>) -> impl IntoView {
    let color_style = format!("color: {}", detail.crop_color);

    view! {
        <div class="card bar-detail">
            <button class="bar-detail-back" on:click=move |_| on_back.run(())>"〈"</button>
            <div class="bar-detail-content">
                <h2>{detail.title.clone()}</h2>
                <div class="bar-detail-rows">
                    <div>"타입: " <b style=color_style>{detail.crop_label.clone()}</b></div>
                    <div>{format!("{}: {}", detail.line_label, detail.line_number)}</div>
                    <div>{format!("길이: {}", detail.length)}</div>
                    <div>{format!("수확 가능 작물: {}", detail.harvest)}</div>
                    <div>{format!("총 작물: {}", detail.total)}</div>
                    <div>{format!("수확 가능 비율: {}", detail.harvest_ratio)}</div>
                </div>
            </div>
        </div>
    }
}
