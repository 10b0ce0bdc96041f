//! 비닐하우스 작업 세션
//!
//! 웹 작업 화면과 같은 `Workflow` 상태 머신을 터미널에서 구동한다.
//! `WorkspaceSession`은 네트워크 호출과 새로고침만 담당하고,
//! `run_interactive`가 dialoguer 메뉴로 사용자 입력을 받는다.

use crate::client::FarmApi;
use crate::error::{Result, SmartFarmError};
use crate::render;
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use smartfarm_common::api::{ERR_GRID, ERR_GROUPS};
use smartfarm_common::detail::GroupDetail;
use smartfarm_common::grid::Grid;
use smartfarm_common::layout::{layout_segments, resolve_axis, GroupLayout};
use smartfarm_common::sequence::RequestSequencer;
use smartfarm_common::types::{
    sensor_status, CropGroup, GreenhouseSummary, GroupAxis, SensorStatus,
};
use smartfarm_common::workflow::{Completion, Workflow, WorkflowState};
use std::path::PathBuf;
use std::time::Duration;

/// 선택된 비닐하우스의 화면 상태
#[derive(Debug, Clone, PartialEq)]
pub struct HouseView {
    pub greenhouse: GreenhouseSummary,
    pub grid: Option<Grid>,
    pub groups: Vec<CropGroup>,
    pub axis: GroupAxis,
    pub sensor: SensorStatus,
}

impl HouseView {
    fn empty(greenhouse: GreenhouseSummary) -> Self {
        Self {
            greenhouse,
            grid: None,
            groups: Vec::new(),
            axis: GroupAxis::Row,
            sensor: sensor_status(None),
        }
    }

    pub fn find_group(&self, group_id: i64) -> Option<&CropGroup> {
        self.groups.iter().find(|g| g.id == group_id)
    }

    /// 선택 가능한 그룹 (길 제외)
    pub fn selectable_groups(&self) -> Vec<&CropGroup> {
        self.groups
            .iter()
            .filter(|g| !g.is_path() && !g.is_empty())
            .collect()
    }
}

pub struct WorkspaceSession<'a, A: FarmApi + ?Sized> {
    api: &'a A,
    pub house: HouseView,
    pub workflow: Workflow<PathBuf>,
    /// 페이지 배너에 해당하는 마지막 오류
    pub banner: Option<String>,
    sequencer: RequestSequencer,
    wait_for_reload: bool,
    show_progress: bool,
}

impl<'a, A: FarmApi + ?Sized> WorkspaceSession<'a, A> {
    /// 세션 시작 (그리드/그룹/센서 로드)
    pub async fn open(api: &'a A, greenhouse: GreenhouseSummary) -> Result<Self> {
        let mut session = Self {
            api,
            house: HouseView::empty(greenhouse),
            workflow: Workflow::new(),
            banner: None,
            sequencer: RequestSequencer::new(),
            wait_for_reload: true,
            show_progress: true,
        };
        session.reload().await;
        Ok(session)
    }

    /// 완료 후 새로고침 지연 없이 즉시 다시 불러온다 (테스트/일괄 실행용)
    pub fn without_reload_delay(mut self) -> Self {
        self.wait_for_reload = false;
        self.show_progress = false;
        self
    }

    pub fn greenhouse_id(&self) -> i64 {
        self.house.greenhouse.id
    }

    /// 그리드/그룹/센서를 동시에 불러와 반영
    ///
    /// 일부가 실패해도 나머지는 반영하고 배너만 남긴다.
    pub async fn reload(&mut self) {
        let ticket = self.sequencer.issue();
        let gh_id = self.greenhouse_id();
        let (grid, groups, sensor) = tokio::join!(
            self.api.grid(gh_id),
            self.api.groups(gh_id),
            self.api.sensor(gh_id),
        );
        if !self.sequencer.is_current(ticket) {
            tracing::debug!(gh_id, "이전 응답 무시");
            return;
        }

        let mut view = HouseView::empty(self.house.greenhouse.clone());
        match grid {
            Ok(response) => view.grid = response.grid(),
            Err(e) => {
                tracing::warn!("그리드 조회 실패: {}", e);
                self.banner = Some(ERR_GRID.to_string());
            }
        }
        match groups {
            Ok(response) => {
                view.axis = resolve_axis(response.axis, &response.groups);
                view.groups = response.groups;
            }
            Err(e) => {
                tracing::warn!("그룹 조회 실패: {}", e);
                self.banner = Some(ERR_GROUPS.to_string());
            }
        }
        view.sensor = sensor_status(sensor.ok().as_ref());
        self.house = view;
    }

    pub fn layout(&self) -> GroupLayout {
        let highlighted = self
            .workflow
            .target_id()
            .or_else(|| self.workflow.detail_group().map(|g| g.id));
        layout_segments(Some(self.house.groups.as_slice()), self.house.axis, highlighted)
    }

    pub fn detail(&self) -> Option<GroupDetail> {
        self.workflow
            .detail_group()
            .map(|group| GroupDetail::new(group, self.house.axis))
    }

    /// 그룹 선택 (상세 보기 또는 대상 토글)
    pub fn select_group(&mut self, group_id: i64) -> Result<bool> {
        let group = self
            .house
            .find_group(group_id)
            .cloned()
            .ok_or(SmartFarmError::GroupNotFound(group_id))?;
        Ok(self.workflow.select_group(&group))
    }

    /// 촬영 시작: IoT 목록까지 불러온다. 목록이 없거나 실패하면 Completion
    pub async fn start_capture(&mut self) -> Result<Option<Completion>> {
        self.workflow.begin_capture()?;
        let devices = self.api.iot_list().await.map_err(|e| e.to_string());
        let completion = self.workflow.devices_loaded(devices);
        if let Some(c) = &completion {
            self.finish(c).await;
        }
        Ok(completion)
    }

    pub fn choose_device(&mut self, device_id: i64) -> Result<()> {
        if !self.workflow.choose_device(device_id) {
            tracing::warn!(device_id, "선택할 수 없는 IoT 기기");
        }
        self.workflow.confirm_device()?;
        Ok(())
    }

    pub async fn submit_capture(&mut self) -> Result<Completion> {
        let request = self.workflow.capture_request()?;
        tracing::info!(group_id = request.group_id, iot_id = request.iot_id, "촬영 명령 전송");
        let spinner = self.spinner("촬영 명령 전송 중...");
        let outcome = self.api.capture(&request).await;
        spinner.finish_and_clear();
        let completion = self.workflow.capture_finished(outcome);
        self.finish(&completion).await;
        Ok(completion)
    }

    pub fn begin_upload(&mut self) -> Result<()> {
        self.workflow.begin_upload()?;
        Ok(())
    }

    pub fn attach_files(&mut self, files: Vec<PathBuf>) -> bool {
        self.workflow.attach_files(files)
    }

    /// 업로드 제출. 대상/파일이 없으면 `WorkflowError::NothingToUpload`
    pub async fn submit_upload(&mut self) -> Result<Completion> {
        let submission = self.workflow.submit_upload()?;
        tracing::info!(
            group_id = submission.group_id,
            files = submission.files.len(),
            "이미지 업로드"
        );
        let spinner = self.spinner(&format!("{}개 이미지 분석 중...", submission.files.len()));
        let outcome = self.api.upload(submission.group_id, &submission.files).await;
        spinner.finish_and_clear();
        let completion = self.workflow.upload_finished(outcome);
        self.finish(&completion).await;
        Ok(completion)
    }

    pub fn cancel(&mut self) -> bool {
        self.workflow.cancel()
    }

    /// 배너 반영과 지연 새로고침
    async fn finish(&mut self, completion: &Completion) {
        if let Some(banner) = &completion.banner {
            self.banner = Some(banner.clone());
        }
        if let Some(delay) = completion.reload_after {
            if self.wait_for_reload {
                let spinner = self.spinner(&format!("{}초 후 새로고침...", delay.as_secs()));
                tokio::time::sleep(delay).await;
                spinner.finish_and_clear();
            }
            self.reload().await;
        }
    }

    fn spinner(&self, message: &str) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner
    }
}

/// 알림/배너 출력
pub fn print_completion(completion: &Completion) {
    if let Some(alert) = &completion.alert {
        println!("🔔 {}", alert);
    }
    if let Some(banner) = &completion.banner {
        println!("⚠ {}", banner);
    }
}

fn prompt_err(e: dialoguer::Error) -> SmartFarmError {
    SmartFarmError::Prompt(e.to_string())
}

pub fn select(prompt: &str, items: &[String]) -> Result<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .map_err(prompt_err)
}

/// 그룹 선택 메뉴. 마지막 항목 선택 시 None
fn choose_group(groups: &[&CropGroup], prompt: &str, last: &str) -> Result<Option<i64>> {
    let mut items: Vec<String> = groups.iter().map(|g| render::group_choice(g)).collect();
    items.push(last.to_string());
    let idx = select(prompt, &items)?;
    Ok(groups.get(idx).map(|g| g.id))
}

fn print_house<A: FarmApi + ?Sized>(session: &mut WorkspaceSession<'_, A>) {
    println!("\n🏠 {}", session.house.greenhouse.name);
    println!("{}", render::sensor(&session.house.sensor));
    if let Some(banner) = session.banner.take() {
        println!("⚠ {}", banner);
    }
    println!("{}\n", render::group_bars(&session.layout()));
    if let Some(detail) = session.detail() {
        println!("{}\n", render::group_detail(&detail));
    }
    if let Some(summary) = session.workflow.upload_summary() {
        println!("📊 분석 결과\n{}\n", render::upload_summary(summary));
    }
}

/// 대화형 작업 루프
pub async fn run_interactive<A: FarmApi + ?Sized>(
    api: &A,
    greenhouse: GreenhouseSummary,
) -> Result<()> {
    let mut session = WorkspaceSession::open(api, greenhouse).await?;

    loop {
        let state = session.workflow.state().clone();
        match state {
            WorkflowState::Idle | WorkflowState::ViewingDetail(_) => {
                print_house(&mut session);
                let items = [
                    "그룹 상세 보기",
                    "촬영",
                    "이미지 업로드",
                    "새로고침",
                    "종료",
                ]
                .map(String::from);
                match select("작업", &items)? {
                    0 => {
                        let groups = session.house.selectable_groups();
                        if let Some(id) = choose_group(&groups, "그룹", "뒤로")? {
                            session.select_group(id)?;
                        } else {
                            session.workflow.back();
                        }
                    }
                    1 => {
                        if let Some(c) = session.start_capture().await? {
                            print_completion(&c);
                        }
                    }
                    2 => session.begin_upload()?,
                    3 => session.reload().await,
                    _ => break,
                }
            }
            WorkflowState::ChoosingIotDevice { devices, .. } => {
                let mut items: Vec<String> = devices.iter().map(render::device_choice).collect();
                items.push("취소".to_string());
                let idx = select("IoT 기기 선택", &items)?;
                match devices.get(idx) {
                    Some(device) => session.choose_device(device.id)?,
                    None => {
                        session.cancel();
                    }
                }
            }
            WorkflowState::AwaitingCaptureTarget { device, target, .. } => {
                println!("\n📷 {} 촬영 영역 선택", device.name);
                println!("{}\n", render::group_bars(&session.layout()));
                let items = ["영역 선택", "촬영 명령 전송", "취소"].map(String::from);
                match select("촬영", &items)? {
                    0 => {
                        let groups = session.house.selectable_groups();
                        if let Some(id) = choose_group(&groups, "영역", "뒤로")? {
                            session.select_group(id)?;
                        }
                    }
                    1 => {
                        if target.is_none() {
                            println!("🔔 촬영할 영역을 선택해주세요.");
                            continue;
                        }
                        let completion = session.submit_capture().await?;
                        print_completion(&completion);
                    }
                    _ => {
                        session.cancel();
                    }
                }
            }
            WorkflowState::ChoosingUploadTarget { files, .. } => {
                println!("\n📤 업로드 영역 선택");
                println!("{}", render::group_bars(&session.layout()));
                println!("첨부 파일 {}개\n", files.len());
                let items = ["영역 선택", "이미지 선택", "업로드", "취소"].map(String::from);
                match select("업로드", &items)? {
                    0 => {
                        let groups = session.house.selectable_groups();
                        if let Some(id) = choose_group(&groups, "영역", "뒤로")? {
                            session.select_group(id)?;
                        }
                    }
                    1 => {
                        let input: String = Input::new()
                            .with_prompt("이미지 파일 또는 폴더 (공백으로 구분)")
                            .interact_text()
                            .map_err(prompt_err)?;
                        let paths: Vec<PathBuf> = input.split_whitespace().map(PathBuf::from).collect();
                        match crate::scanner::collect_upload_files(&paths) {
                            Ok(found) => {
                                println!("✔ {}개 이미지", found.len());
                                session.attach_files(found);
                            }
                            Err(e) => println!("⚠ {}", e),
                        }
                    }
                    2 => match session.submit_upload().await {
                        Ok(completion) => print_completion(&completion),
                        Err(SmartFarmError::Workflow(e)) => println!("🔔 {}", e),
                        Err(e) => return Err(e),
                    },
                    _ => {
                        session.cancel();
                    }
                }
            }
            WorkflowState::UploadingFiles { .. } => {
                // submit_upload가 끝나기 전에는 오지 않는다
                session.workflow.reset();
            }
        }
    }

    Ok(())
}

/// 비닐하우스 선택 (id가 주어지면 그대로)
pub fn pick_greenhouse(
    list: &[GreenhouseSummary],
    farm_id: i64,
    greenhouse_id: Option<i64>,
) -> Result<GreenhouseSummary> {
    if let Some(id) = greenhouse_id {
        return list
            .iter()
            .find(|gh| gh.id == id)
            .cloned()
            .ok_or(SmartFarmError::NoGreenhouse(farm_id));
    }
    match list {
        [] => Err(SmartFarmError::NoGreenhouse(farm_id)),
        [only] => Ok(only.clone()),
        _ => {
            let items: Vec<String> = list.iter().map(|gh| format!("[{}] {}", gh.id, gh.name)).collect();
            let idx = select("비닐하우스", &items)?;
            Ok(list[idx].clone())
        }
    }
}

/// 예/아니오 확인 (기본값 아니오)
pub fn confirm(prompt: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(prompt_err)
}
