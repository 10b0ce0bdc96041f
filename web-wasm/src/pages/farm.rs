//! 농장 작업 화면 (`/farm/:farm_id`)
//!
//! 비닐하우스 선택, 그룹 막대, 날씨/환경 패널, 촬영/업로드 워크플로, 그리드 편집.
//! 워크플로 상태는 `smartfarm_common::workflow::Workflow`가 가지고,
//! 이 화면은 네트워크 호출과 알림 표시만 담당한다.

use crate::api::farm::{
    delete_greenhouse, fetch_farm, fetch_greenhouses, fetch_grid, fetch_groups, fetch_iot_list,
    fetch_sensor, fetch_weather, save_grid, send_capture, upload_images,
};
use crate::components::{
    bar_detail::BarDetail, capture_area::CaptureArea, control_card::ControlCard,
    grid_editor::GridEditor, group_bars::GroupBars, header::FarmHeader, iot_modal::IotModal,
    sensor_panel::SensorPanel, sidebar::Sidebar, upload_modal::{UploadModal, UploadSummary},
    weather_card::WeatherCard,
};
use crate::config::use_api_config;
use gloo::timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;
use smartfarm_common::api::{
    CONFIRM_DELETE, ERR_DELETE, ERR_FARM, ERR_GREENHOUSES, ERR_GRID, ERR_GRID_SAVE, ERR_GROUPS,
    ERR_WEATHER,
};
use smartfarm_common::detail::GroupDetail;
use smartfarm_common::grid::{EditMode, Grid};
use smartfarm_common::layout::{layout_segments, resolve_axis, GroupLayout};
use smartfarm_common::sequence::RequestSequencer;
use smartfarm_common::types::{
    remove_greenhouse, sensor_status, CropGroup, Farm, GreenhouseSummary, GroupAxis,
    SensorReading, SensorStatus, WeatherReport,
};
use smartfarm_common::workflow::{Completion, Workflow, WorkflowError, WorkflowState};
use web_sys::File;

/// 선택된 비닐하우스의 그리드/그룹
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HouseState {
    pub grid: Option<Grid>,
    pub num_rows: usize,
    pub num_cols: usize,
    pub groups: Vec<CropGroup>,
    pub axis: Option<GroupAxis>,
}

impl HouseState {
    pub fn axis(&self) -> GroupAxis {
        resolve_axis(self.axis, &self.groups)
    }

    pub fn find_group(&self, id: i64) -> Option<CropGroup> {
        self.groups.iter().find(|g| g.id == id).cloned()
    }

    pub fn layout(&self, selected_id: Option<i64>) -> GroupLayout {
        layout_segments(Some(self.groups.as_slice()), self.axis(), selected_id)
    }

    /// 메인 화면 막대. 선택 강조는 촬영/업로드 모달에서만 쓴다
    pub fn main_layout(&self) -> GroupLayout {
        self.layout(None)
    }
}

/// 열려 있는 모달 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModalKind {
    None,
    IotDevice,
    CaptureTarget,
    Upload,
}

impl ModalKind {
    fn of<F>(state: &WorkflowState<F>) -> Self {
        match state {
            WorkflowState::Idle | WorkflowState::ViewingDetail(_) => ModalKind::None,
            WorkflowState::ChoosingIotDevice { .. } => ModalKind::IotDevice,
            WorkflowState::AwaitingCaptureTarget { .. } => ModalKind::CaptureTarget,
            WorkflowState::ChoosingUploadTarget { .. } | WorkflowState::UploadingFiles { .. } => {
                ModalKind::Upload
            }
        }
    }
}

/// 워크플로 종료 효과 반영 (배너, 알림, 지연 새로고침)
fn apply_completion(completion: Completion, error: RwSignal<Option<String>>, reload_tick: RwSignal<u32>) {
    if let Some(banner) = completion.banner {
        error.set(Some(banner));
    }
    if let Some(alert) = completion.alert {
        gloo::dialogs::alert(&alert);
    }
    if let Some(delay) = completion.reload_after {
        Timeout::new(delay.as_millis() as u32, move || {
            reload_tick.update(|t| *t += 1);
        })
        .forget();
    }
}

#[component]
pub fn FarmPage() -> impl IntoView {
    let params = use_params_map();
    let farm_id = Memo::new(move |_| {
        params.with(|p| p.get("farm_id").and_then(|id| id.to_string().parse::<i64>().ok()))
    });
    let config = use_api_config();

    let farm = RwSignal::new(None::<Farm>);
    let greenhouses = RwSignal::new(Vec::<GreenhouseSummary>::new());
    let selected = RwSignal::new(None::<GreenhouseSummary>);
    let weather = RwSignal::new(None::<WeatherReport>);
    let house = RwSignal::new(HouseState::default());
    let sensor = RwSignal::new(None::<SensorReading>);
    let sensor_loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let sidebar_open = RwSignal::new(true);
    let reload_tick = RwSignal::new(0u32);
    let edit_mode = RwSignal::new(EditMode::default());
    let workflow = RwSignal::new_local(Workflow::<File>::new());
    let sequencer = StoredValue::new(RequestSequencer::new());
    let farm_sequencer = StoredValue::new(RequestSequencer::new());

    // 농장 정보 + 비닐하우스 목록. 농장이 바뀌면 이전 농장의 응답은 버린다
    Effect::new({
        let config = config.clone();
        move |_| {
            let Some(id) = farm_id.get() else {
                farm_sequencer.with_value(|s| s.invalidate());
                error.set(Some(ERR_FARM.to_string()));
                return;
            };
            let ticket = farm_sequencer.with_value(|s| s.issue());
            let config_farm = config.clone();
            spawn_local(async move {
                let result = fetch_farm(&config_farm, id).await;
                if !farm_sequencer.with_value(|s| s.is_current(ticket)) {
                    log::debug!("이전 농장({}) 응답 무시", id);
                    return;
                }
                match result {
                    Ok(data) => farm.set(Some(data)),
                    Err(e) => {
                        log::warn!("농장 조회 실패: {}", e);
                        error.set(Some(ERR_FARM.to_string()));
                    }
                }
            });
            let config_list = config.clone();
            spawn_local(async move {
                let result = fetch_greenhouses(&config_list, id).await;
                if !farm_sequencer.with_value(|s| s.is_current(ticket)) {
                    log::debug!("이전 농장({}) 목록 무시", id);
                    return;
                }
                match result {
                    Ok(list) => {
                        selected.set(list.first().cloned());
                        greenhouses.set(list);
                    }
                    Err(e) => {
                        log::warn!("비닐하우스 목록 조회 실패: {}", e);
                        greenhouses.set(Vec::new());
                        error.set(Some(ERR_GREENHOUSES.to_string()));
                    }
                }
            });
        }
    });

    // 농장 위치 기준 날씨
    Effect::new({
        let config = config.clone();
        move |_| {
            let Some(location) = farm.with(|f| f.as_ref().and_then(|f| f.location.clone())) else {
                return;
            };
            let config = config.clone();
            spawn_local(async move {
                match fetch_weather(&config, &location).await {
                    Ok(report) => weather.set(Some(report)),
                    Err(e) => {
                        log::warn!("날씨 조회 실패: {}", e);
                        error.set(Some(ERR_WEATHER.to_string()));
                    }
                }
            });
        }
    });

    // 선택된 비닐하우스의 그리드/그룹/센서. 새로고침 틱에도 다시 불러온다
    Effect::new({
        let config = config.clone();
        move |_| {
            reload_tick.track();
            let Some(gh_id) = selected.with(|s| s.as_ref().map(|gh| gh.id)) else {
                sequencer.with_value(|s| s.invalidate());
                house.set(HouseState::default());
                sensor.set(None);
                sensor_loading.set(false);
                return;
            };
            let ticket = sequencer.with_value(|s| s.issue());
            sensor_loading.set(true);
            let config = config.clone();
            spawn_local(async move {
                let (grid, groups, reading) = futures::join!(
                    fetch_grid(&config, gh_id),
                    fetch_groups(&config, gh_id),
                    fetch_sensor(&config, gh_id),
                );
                if !sequencer.with_value(|s| s.is_current(ticket)) {
                    log::debug!("이전 비닐하우스({}) 응답 무시", gh_id);
                    return;
                }

                let mut state = HouseState::default();
                match grid {
                    Ok(response) => {
                        state.grid = response.grid();
                        state.num_rows = response.num_rows;
                        state.num_cols = response.num_cols;
                    }
                    Err(e) => {
                        log::warn!("그리드 조회 실패: {}", e);
                        error.set(Some(ERR_GRID.to_string()));
                    }
                }
                match groups {
                    Ok(response) => {
                        state.groups = response.groups;
                        state.axis = response.axis;
                    }
                    Err(e) => {
                        log::warn!("그룹 조회 실패: {}", e);
                        error.set(Some(ERR_GROUPS.to_string()));
                    }
                }
                house.set(state);
                sensor.set(reading.ok());
                sensor_loading.set(false);
            });
        }
    });

    let on_select_greenhouse = Callback::new(move |gh: GreenhouseSummary| {
        if selected.with(|s| s.as_ref().map(|cur| cur.id)) == Some(gh.id) {
            return;
        }
        workflow.update(|w| w.reset());
        edit_mode.update(|m| m.cancel());
        selected.set(Some(gh));
    });

    // 그룹 막대 클릭 (상세 보기 / 촬영·업로드 대상 토글)
    let on_bar_select = Callback::new(move |group_id: i64| {
        if let Some(group) = house.with(|h| h.find_group(group_id)) {
            workflow.update(|w| {
                w.select_group(&group);
            });
        }
    });

    let on_back = Callback::new(move |_: ()| {
        workflow.update(|w| {
            w.back();
        });
    });

    let on_cancel = Callback::new(move |_: ()| {
        workflow.update(|w| {
            w.cancel();
        });
    });

    // ---- 촬영 ----
    let on_capture = Callback::new({
        let config = config.clone();
        move |_: ()| {
            let started = workflow.try_update(|w| w.begin_capture()).unwrap_or(Err(
                WorkflowError::InvalidTransition("capture"),
            ));
            if let Err(e) = started {
                log::debug!("촬영 시작 불가: {}", e);
                return;
            }
            let config = config.clone();
            spawn_local(async move {
                let result = fetch_iot_list(&config).await;
                if let Some(completion) = workflow.try_update(|w| w.devices_loaded(result)).flatten() {
                    apply_completion(completion, error, reload_tick);
                }
            });
        }
    });

    let on_choose_device = Callback::new(move |device_id: i64| {
        workflow.update(|w| {
            w.choose_device(device_id);
        });
    });

    let on_confirm_device = Callback::new(move |_: ()| {
        if let Some(Err(e)) = workflow.try_update(|w| w.confirm_device()) {
            gloo::dialogs::alert(&e.to_string());
        }
    });

    let on_capture_confirm = Callback::new({
        let config = config.clone();
        move |_: ()| {
            let request = match workflow.try_update(|w| w.capture_request()) {
                Some(Ok(request)) => request,
                Some(Err(e)) => {
                    gloo::dialogs::alert(&e.to_string());
                    return;
                }
                None => return,
            };
            let config = config.clone();
            spawn_local(async move {
                let outcome = send_capture(&config, &request).await;
                if let Some(completion) = workflow.try_update(|w| w.capture_finished(outcome)) {
                    apply_completion(completion, error, reload_tick);
                }
            });
        }
    });

    // ---- 업로드 ----
    let on_upload = Callback::new(move |_: ()| {
        if let Some(Err(e)) = workflow.try_update(|w| w.begin_upload()) {
            log::debug!("업로드 시작 불가: {}", e);
        }
    });

    let on_files = Callback::new(move |files: Vec<File>| {
        workflow.update(|w| {
            w.attach_files(files);
        });
    });

    let on_upload_confirm = Callback::new({
        let config = config.clone();
        move |_: ()| {
            let submission = match workflow.try_update(|w| w.submit_upload()) {
                Some(Ok(submission)) => submission,
                Some(Err(e)) => {
                    // 대상/파일이 없으면 요청 없이 안내만
                    gloo::dialogs::alert(&e.to_string());
                    return;
                }
                None => return,
            };
            let config = config.clone();
            spawn_local(async move {
                let outcome = upload_images(&config, submission.group_id, &submission.files).await;
                if let Some(completion) = workflow.try_update(|w| w.upload_finished(outcome)) {
                    apply_completion(completion, error, reload_tick);
                }
            });
        }
    });

    // ---- 그리드 편집 ----
    let on_edit = Callback::new(move |_: ()| {
        let Some(grid) = house.with(|h| h.grid.clone()) else {
            error.set(Some(ERR_GRID.to_string()));
            return;
        };
        workflow.update(|w| w.reset());
        edit_mode.update(|m| m.begin(&grid));
    });

    let on_cell = Callback::new(move |(row, col, value): (usize, usize, String)| {
        if let Some(Err(e)) = edit_mode.try_update(|m| m.set_cell_from_input(row, col, &value)) {
            log::warn!("셀 변경 거부: {}", e);
        }
    });

    let on_save_grid = Callback::new({
        let config = config.clone();
        move |_: ()| {
            let Some(gh) = selected.get_untracked() else {
                return;
            };
            let (rows, cols) = house.with_untracked(|h| (h.num_rows, h.num_cols));
            let Some(request) = edit_mode.try_update(|m| m.save_request(&gh.name, rows, cols)).flatten() else {
                return;
            };
            let config = config.clone();
            spawn_local(async move {
                match save_grid(&config, gh.id, &request).await {
                    Ok(()) => {
                        let saved = edit_mode.try_update(|m| m.finish_save()).flatten();
                        house.update(|h| h.grid = saved);
                        // 서버가 그룹을 다시 만들었으므로 새로 불러온다
                        reload_tick.update(|t| *t += 1);
                    }
                    Err(e) => {
                        log::warn!("그리드 저장 실패: {}", e);
                        edit_mode.update(|m| m.save_failed());
                        error.set(Some(ERR_GRID_SAVE.to_string()));
                    }
                }
            });
        }
    });

    let on_cancel_edit = Callback::new(move |_: ()| edit_mode.update(|m| m.cancel()));

    // ---- 삭제 ----
    let on_delete = Callback::new({
        let config = config.clone();
        move |_: ()| {
            let Some(gh) = selected.get_untracked() else {
                return;
            };
            if !gloo::dialogs::confirm(CONFIRM_DELETE) {
                return;
            }
            let config = config.clone();
            spawn_local(async move {
                match delete_greenhouse(&config, gh.id).await {
                    Ok(()) => {
                        let mut next = None;
                        greenhouses.update(|list| next = remove_greenhouse(list, gh.id));
                        workflow.update(|w| w.reset());
                        selected.set(next);
                    }
                    Err(e) => {
                        log::warn!("비닐하우스 삭제 실패: {}", e);
                        error.set(Some(ERR_DELETE.to_string()));
                    }
                }
            });
        }
    });

    // ---- 파생 값 ----
    let modal_kind = Memo::new(move |_| workflow.with(|w| ModalKind::of(w.state())));
    let main_layout = Signal::derive(move || house.with(HouseState::main_layout));
    let target_layout = Signal::derive(move || {
        let target_id = workflow.with(|w| w.target_id());
        house.with(|h| h.layout(target_id))
    });
    let controls_disabled = Signal::derive(move || {
        selected.with(|s| s.is_none())
            || modal_kind.get() != ModalKind::None
            || edit_mode.with(|m| m.is_editing())
    });
    let sensor_view = Signal::derive(move || -> SensorStatus { sensor.with(|r| sensor_status(r.as_ref())) });
    let edit_preview = Signal::derive(move || {
        edit_mode.with(|m| match m.preview() {
            Some((axis, groups)) => format!(
                "저장하면 {}개 그룹({} 방향)으로 다시 나뉩니다.",
                groups.len(),
                if axis == GroupAxis::Row { "행" } else { "열" }
            ),
            None => String::new(),
        })
    });

    view! {
        <div class="farm-detail">
            {move || {
                farm_id.get().map(|id| view! {
                    <Sidebar
                        farm_id=id
                        greenhouses=greenhouses
                        selected_id=Signal::derive(move || selected.with(|s| s.as_ref().map(|gh| gh.id)))
                        open=sidebar_open
                        on_select=on_select_greenhouse
                    />
                })
            }}
            <main class="farm-main">
                <FarmHeader farm=farm />
                {move || error.get().map(|message| view! {
                    <div class="error-banner" on:click=move |_| error.set(None)>{message}</div>
                })}

                <div class="farm-top">
                    <WeatherCard report=weather />
                    <SensorPanel status=sensor_view loading=sensor_loading />
                </div>

                <div class="farm-body">
                    <Show
                        when=move || edit_mode.with(|m| m.is_editing())
                        fallback=move || view! {
                            <GroupBars layout=main_layout on_select=on_bar_select />
                        }
                    >
                        <GridEditor
                            draft=Signal::derive(move || edit_mode.with(|m| m.draft().cloned()))
                            preview=edit_preview
                            saving=Signal::derive(move || {
                                edit_mode.with(|m| matches!(m, EditMode::Editing { saving: true, .. }))
                            })
                            on_cell=on_cell
                            on_save=on_save_grid
                            on_cancel=on_cancel_edit
                        />
                    </Show>

                    <div class="farm-side">
                        {move || {
                            let detail = workflow.with(|w| w.detail_group().cloned());
                            detail.map(|group| {
                                let detail = GroupDetail::new(&group, house.with(|h| h.axis()));
                                view! { <BarDetail detail=detail on_back=on_back /> }
                            })
                        }}
                        <ControlCard
                            disabled=controls_disabled
                            on_capture=on_capture
                            on_upload=on_upload
                            on_edit=on_edit
                            on_delete=on_delete
                        />
                        {move || {
                            workflow
                                .with(|w| w.upload_summary().cloned())
                                .map(|analysis| view! { <UploadSummary analysis=analysis /> })
                        }}
                    </div>
                </div>

                {move || match modal_kind.get() {
                    ModalKind::None => ().into_any(),
                    ModalKind::IotDevice => view! {
                        <IotModal
                            devices=Signal::derive(move || workflow.with(|w| match w.state() {
                                WorkflowState::ChoosingIotDevice { devices, .. } => devices.clone(),
                                _ => Vec::new(),
                            }))
                            selected=Signal::derive(move || workflow.with(|w| match w.state() {
                                WorkflowState::ChoosingIotDevice { selected, .. } => *selected,
                                _ => None,
                            }))
                            loading=Signal::derive(move || workflow.with(|w| matches!(
                                w.state(),
                                WorkflowState::ChoosingIotDevice { loading: true, .. }
                            )))
                            on_choose=on_choose_device
                            on_confirm=on_confirm_device
                            on_cancel=on_cancel
                        />
                    }
                    .into_any(),
                    ModalKind::CaptureTarget => {
                        let device_name = workflow.with_untracked(|w| match w.state() {
                            WorkflowState::AwaitingCaptureTarget { device, .. } => device.name.clone(),
                            _ => String::new(),
                        });
                        view! {
                            <CaptureArea
                                device_name=device_name
                                layout=target_layout
                                has_target=Signal::derive(move || workflow.with(|w| w.target_id().is_some()))
                                submitting=Signal::derive(move || workflow.with(|w| w.is_in_flight()))
                                on_select=on_bar_select
                                on_confirm=on_capture_confirm
                                on_cancel=on_cancel
                            />
                        }
                        .into_any()
                    }
                    ModalKind::Upload => view! {
                        <UploadModal
                            layout=target_layout
                            file_names=Signal::derive(move || {
                                workflow.with(|w| w.files().iter().map(|f| f.name()).collect::<Vec<_>>())
                            })
                            uploading=Signal::derive(move || workflow.with(|w| w.is_in_flight()))
                            on_select=on_bar_select
                            on_files=on_files
                            on_confirm=on_upload_confirm
                            on_cancel=on_cancel
                        />
                    }
                    .into_any(),
                }}
            </main>
        </div>
    }
}
