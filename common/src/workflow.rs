//! 그룹 선택 / 촬영 / 업로드 워크플로 상태 머신
//!
//! 모달(IoT 선택, 촬영 영역 선택, 업로드)은 하나의 enum 상태로 관리되므로
//! 동시에 두 개가 열릴 수 없다. 전이 함수는 I/O를 하지 않고
//! 요청 값이나 [`Completion`](알림/배너/새로고침 지연)을 돌려준다.
//! 실제 네트워크 호출은 웹/CLI 쪽에서 수행한다.
//!
//! 파일 핸들 타입 `F`는 웹에서는 `web_sys::File`, CLI에서는 `PathBuf`.

use crate::types::{CaptureRequest, CropGroup, IotDevice, UploadAnalysis};
use std::time::Duration;
use thiserror::Error;

/// 촬영 명령 성공 후 새로고침까지의 지연
pub const CAPTURE_RELOAD_DELAY: Duration = Duration::from_secs(5);

/// 업로드 분석 성공 후 새로고침까지의 지연
pub const UPLOAD_RELOAD_DELAY: Duration = Duration::from_secs(2);

pub const MSG_NO_IOT: &str = "IoT를 구독해주세요.";
pub const MSG_IOT_LIST_FAILED: &str = "IoT 목록을 불러오는데 실패했습니다.";
pub const MSG_CAPTURE_SENT: &str = "IoT 촬영 명령이 전송되었습니다. 잠시 후 결과가 업데이트됩니다.";
pub const MSG_CAPTURE_FAILED: &str = "촬영 명령 전송 실패: ";
pub const MSG_CAPTURE_NETWORK_BANNER: &str = "IoT 촬영 명령 전송에 실패했습니다.";
pub const MSG_NETWORK_ERROR: &str = "네트워크 오류가 발생했습니다.";
pub const MSG_UPLOAD_PROMPT: &str = "영역을 선택하고 이미지를 업로드해주세요.";
pub const MSG_UPLOAD_DONE: &str = "이미지 분석이 완료되었습니다!";
pub const MSG_UPLOAD_FAILED: &str = "분석 실패: ";
pub const MSG_UPLOAD_ERROR: &str = "업로드 중 오류가 발생했습니다: ";

/// 워크플로 전이 거부 사유
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("영역을 선택하고 이미지를 업로드해주세요.")]
    NothingToUpload,

    #[error("IoT 기기를 선택해주세요.")]
    NoDeviceSelected,

    #[error("촬영할 영역을 선택해주세요.")]
    NoCaptureTarget,

    #[error("지금은 할 수 없는 작업입니다: {0}")]
    InvalidTransition(&'static str),
}

/// 워크플로 상태
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowState<F> {
    Idle,
    ViewingDetail(CropGroup),
    ChoosingIotDevice {
        devices: Vec<IotDevice>,
        selected: Option<i64>,
        loading: bool,
    },
    AwaitingCaptureTarget {
        device: IotDevice,
        target: Option<CropGroup>,
        submitting: bool,
    },
    ChoosingUploadTarget {
        target: Option<CropGroup>,
        files: Vec<F>,
    },
    UploadingFiles {
        group: CropGroup,
        files: Vec<F>,
    },
}

impl<F> Default for WorkflowState<F> {
    fn default() -> Self {
        WorkflowState::Idle
    }
}

/// 촬영 명령 결과
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    /// 서버가 명령을 받아들임
    Accepted,
    /// 서버가 거부 (서버 메시지)
    Rejected(String),
    /// 전송 실패
    Network(String),
}

/// 업로드 분석 결과
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    Analyzed(UploadAnalysis),
    Rejected(String),
    Network(String),
}

/// 워크플로 종료 시 화면에 반영할 효과
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Completion {
    pub alert: Option<String>,
    pub banner: Option<String>,
    pub reload_after: Option<Duration>,
}

impl Completion {
    fn alert(text: impl Into<String>) -> Self {
        Self {
            alert: Some(text.into()),
            ..Default::default()
        }
    }

    fn banner(text: impl Into<String>) -> Self {
        Self {
            banner: Some(text.into()),
            ..Default::default()
        }
    }

    fn reload(mut self, delay: Duration) -> Self {
        self.reload_after = Some(delay);
        self
    }
}

/// 업로드 요청에 필요한 값
#[derive(Debug, Clone, PartialEq)]
pub struct UploadSubmission<F> {
    pub group_id: i64,
    pub files: Vec<F>,
}

/// 워크플로 (상태 + 마지막 업로드 결과)
#[derive(Debug, Clone, PartialEq)]
pub struct Workflow<F> {
    state: WorkflowState<F>,
    upload_summary: Option<UploadAnalysis>,
}

impl<F> Default for Workflow<F> {
    fn default() -> Self {
        Self {
            state: WorkflowState::Idle,
            upload_summary: None,
        }
    }
}

impl<F: Clone> Workflow<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &WorkflowState<F> {
        &self.state
    }

    /// 마지막 업로드 분석 결과 (인라인 표시용)
    pub fn upload_summary(&self) -> Option<&UploadAnalysis> {
        self.upload_summary.as_ref()
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, WorkflowState::Idle)
    }

    /// 모달이 열려 있는지 (상세 보기는 모달이 아님)
    pub fn is_modal_open(&self) -> bool {
        !matches!(
            self.state,
            WorkflowState::Idle | WorkflowState::ViewingDetail(_)
        )
    }

    /// 제출 중이면 취소/선택 불가
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self.state,
            WorkflowState::UploadingFiles { .. }
                | WorkflowState::AwaitingCaptureTarget { submitting: true, .. }
        )
    }

    pub fn detail_group(&self) -> Option<&CropGroup> {
        match &self.state {
            WorkflowState::ViewingDetail(group) => Some(group),
            _ => None,
        }
    }

    /// 촬영/업로드 대상으로 선택된 그룹 id
    pub fn target_id(&self) -> Option<i64> {
        match &self.state {
            WorkflowState::AwaitingCaptureTarget { target, .. }
            | WorkflowState::ChoosingUploadTarget { target, .. } => target.as_ref().map(|g| g.id),
            WorkflowState::UploadingFiles { group, .. } => Some(group.id),
            _ => None,
        }
    }

    pub fn files(&self) -> &[F] {
        match &self.state {
            WorkflowState::ChoosingUploadTarget { files, .. }
            | WorkflowState::UploadingFiles { files, .. } => files,
            _ => &[],
        }
    }

    /// 그룹 클릭
    ///
    /// - Idle / 상세 보기: 상세 보기로 전환
    /// - 촬영/업로드 영역 선택 중: 대상 토글 (같은 그룹을 다시 누르면 해제)
    /// - 길(코드 0)은 항상 무시
    ///
    /// 상태가 바뀌었으면 true
    pub fn select_group(&mut self, group: &CropGroup) -> bool {
        if group.is_path() || group.is_empty() {
            return false;
        }
        if matches!(self.state, WorkflowState::Idle | WorkflowState::ViewingDetail(_)) {
            self.state = WorkflowState::ViewingDetail(group.clone());
            return true;
        }
        match &mut self.state {
            WorkflowState::AwaitingCaptureTarget {
                target,
                submitting: false,
                ..
            }
            | WorkflowState::ChoosingUploadTarget { target, .. } => {
                toggle_target(target, group);
                true
            }
            _ => false,
        }
    }

    /// 상세 보기에서 뒤로
    pub fn back(&mut self) -> bool {
        if matches!(self.state, WorkflowState::ViewingDetail(_)) {
            self.state = WorkflowState::Idle;
            true
        } else {
            false
        }
    }

    /// 촬영 시작: IoT 목록 로딩 상태로 전환. 이후 목록을 요청해 `devices_loaded`로 전달
    pub fn begin_capture(&mut self) -> Result<(), WorkflowError> {
        self.ensure_startable("capture")?;
        self.state = WorkflowState::ChoosingIotDevice {
            devices: Vec::new(),
            selected: None,
            loading: true,
        };
        Ok(())
    }

    /// IoT 목록 응답 반영. 워크플로가 끝나면 Completion 반환
    pub fn devices_loaded(&mut self, result: Result<Vec<IotDevice>, String>) -> Option<Completion> {
        let WorkflowState::ChoosingIotDevice { devices, loading, .. } = &mut self.state else {
            return None;
        };
        match result {
            Ok(list) if list.is_empty() => {
                self.state = WorkflowState::Idle;
                Some(Completion::alert(MSG_NO_IOT))
            }
            Ok(list) => {
                *devices = list;
                *loading = false;
                None
            }
            Err(_) => {
                self.state = WorkflowState::Idle;
                Some(Completion::banner(MSG_IOT_LIST_FAILED))
            }
        }
    }

    /// IoT 기기 선택
    pub fn choose_device(&mut self, device_id: i64) -> bool {
        match &mut self.state {
            WorkflowState::ChoosingIotDevice {
                devices,
                selected,
                loading: false,
            } if devices.iter().any(|d| d.id == device_id) => {
                *selected = Some(device_id);
                true
            }
            _ => false,
        }
    }

    /// 기기 확정 → 촬영 영역 선택
    pub fn confirm_device(&mut self) -> Result<(), WorkflowError> {
        let WorkflowState::ChoosingIotDevice { devices, selected, .. } = &self.state else {
            return Err(WorkflowError::InvalidTransition("confirm_device"));
        };
        let device = selected
            .and_then(|id| devices.iter().find(|d| d.id == id))
            .cloned()
            .ok_or(WorkflowError::NoDeviceSelected)?;
        self.state = WorkflowState::AwaitingCaptureTarget {
            device,
            target: None,
            submitting: false,
        };
        Ok(())
    }

    /// 촬영 명령 요청 생성 (제출 중 상태로 전환)
    pub fn capture_request(&mut self) -> Result<CaptureRequest, WorkflowError> {
        let WorkflowState::AwaitingCaptureTarget {
            device,
            target,
            submitting,
        } = &mut self.state
        else {
            return Err(WorkflowError::InvalidTransition("capture_request"));
        };
        if *submitting {
            return Err(WorkflowError::InvalidTransition("capture_request"));
        }
        let group = target.as_ref().ok_or(WorkflowError::NoCaptureTarget)?;
        let request = CaptureRequest {
            group_id: group.id,
            iot_id: device.id,
        };
        *submitting = true;
        Ok(request)
    }

    /// 촬영 명령 결과 반영. 성공/실패 모두 Idle로 종료
    pub fn capture_finished(&mut self, outcome: CaptureOutcome) -> Completion {
        self.state = WorkflowState::Idle;
        match outcome {
            CaptureOutcome::Accepted => {
                Completion::alert(MSG_CAPTURE_SENT).reload(CAPTURE_RELOAD_DELAY)
            }
            CaptureOutcome::Rejected(message) => {
                Completion::alert(format!("{}{}", MSG_CAPTURE_FAILED, message))
            }
            CaptureOutcome::Network(_) => Completion {
                alert: Some(MSG_NETWORK_ERROR.to_string()),
                banner: Some(MSG_CAPTURE_NETWORK_BANNER.to_string()),
                reload_after: None,
            },
        }
    }

    /// 업로드 시작
    pub fn begin_upload(&mut self) -> Result<(), WorkflowError> {
        self.ensure_startable("upload")?;
        self.upload_summary = None;
        self.state = WorkflowState::ChoosingUploadTarget {
            target: None,
            files: Vec::new(),
        };
        Ok(())
    }

    /// 첨부 파일 교체
    pub fn attach_files(&mut self, new_files: Vec<F>) -> bool {
        match &mut self.state {
            WorkflowState::ChoosingUploadTarget { files, .. } => {
                *files = new_files;
                true
            }
            _ => false,
        }
    }

    /// 업로드 제출. 대상이 없거나 파일이 0개면 네트워크 호출 없이 거부
    pub fn submit_upload(&mut self) -> Result<UploadSubmission<F>, WorkflowError> {
        let WorkflowState::ChoosingUploadTarget { target, files } = &mut self.state else {
            return Err(WorkflowError::InvalidTransition("submit_upload"));
        };
        let Some(group) = target.clone() else {
            return Err(WorkflowError::NothingToUpload);
        };
        if files.is_empty() {
            return Err(WorkflowError::NothingToUpload);
        }
        let files = std::mem::take(files);
        let submission = UploadSubmission {
            group_id: group.id,
            files: files.clone(),
        };
        self.state = WorkflowState::UploadingFiles { group, files };
        Ok(submission)
    }

    /// 업로드 결과 반영
    ///
    /// 성공: 결과 요약 저장 후 Idle. 실패: 대상과 파일을 유지한 채 영역 선택으로 복귀
    pub fn upload_finished(&mut self, outcome: UploadOutcome) -> Completion {
        let (group, files) = match std::mem::take(&mut self.state) {
            WorkflowState::UploadingFiles { group, files } => (group, files),
            other => {
                self.state = other;
                return Completion::default();
            }
        };
        match outcome {
            UploadOutcome::Analyzed(analysis) => {
                self.upload_summary = Some(analysis);
                Completion::alert(MSG_UPLOAD_DONE).reload(UPLOAD_RELOAD_DELAY)
            }
            UploadOutcome::Rejected(message) => {
                self.state = WorkflowState::ChoosingUploadTarget {
                    target: Some(group),
                    files,
                };
                Completion::alert(format!("{}{}", MSG_UPLOAD_FAILED, message))
            }
            UploadOutcome::Network(err) => {
                self.state = WorkflowState::ChoosingUploadTarget {
                    target: Some(group),
                    files,
                };
                Completion::alert(format!("{}{}", MSG_UPLOAD_ERROR, err))
            }
        }
    }

    /// 취소: 제출 중이 아니면 Idle로 복귀하고 선택을 지운다
    pub fn cancel(&mut self) -> bool {
        if self.is_in_flight() || self.is_idle() {
            return false;
        }
        self.state = WorkflowState::Idle;
        self.upload_summary = None;
        true
    }

    /// 비닐하우스 변경 시 초기화
    pub fn reset(&mut self) {
        self.state = WorkflowState::Idle;
        self.upload_summary = None;
    }

    fn ensure_startable(&self, action: &'static str) -> Result<(), WorkflowError> {
        match self.state {
            WorkflowState::Idle | WorkflowState::ViewingDetail(_) => Ok(()),
            _ => Err(WorkflowError::InvalidTransition(action)),
        }
    }
}

fn toggle_target(target: &mut Option<CropGroup>, group: &CropGroup) {
    if target.as_ref().map(|g| g.id) == Some(group.id) {
        *target = None;
    } else {
        *target = Some(group.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crop::CropType;

    type Flow = Workflow<String>;

    fn group(id: i64, crop: i64) -> CropGroup {
        CropGroup {
            id,
            group_cells: vec![[0, 0], [0, 1]],
            crop_type: CropType(crop),
            is_horizontal: true,
            ..Default::default()
        }
    }

    fn device(id: i64) -> IotDevice {
        IotDevice {
            id,
            name: format!("카메라{}", id),
        }
    }

    fn capture_ready(flow: &mut Flow) {
        flow.begin_capture().expect("촬영 시작 실패");
        assert!(flow.devices_loaded(Ok(vec![device(7)])).is_none());
        assert!(flow.choose_device(7));
        flow.confirm_device().expect("기기 확정 실패");
    }

    // =============================================
    // 상세 보기
    // =============================================

    #[test]
    fn test_detail_and_back() {
        let mut flow = Flow::new();
        assert!(flow.select_group(&group(1, 1)));
        assert_eq!(flow.detail_group().map(|g| g.id), Some(1));
        assert!(!flow.is_modal_open());
        assert!(flow.back());
        assert!(flow.is_idle());
    }

    #[test]
    fn test_path_group_ignored_everywhere() {
        let mut flow = Flow::new();
        assert!(!flow.select_group(&group(1, 0)));
        assert!(flow.is_idle());

        capture_ready(&mut flow);
        assert!(!flow.select_group(&group(1, 0)));
        assert_eq!(flow.target_id(), None);

        flow.cancel();
        flow.begin_upload().expect("업로드 시작 실패");
        assert!(!flow.select_group(&group(1, 0)));
        assert_eq!(flow.target_id(), None);
    }

    // =============================================
    // 촬영
    // =============================================

    #[test]
    fn test_empty_device_list_aborts() {
        let mut flow = Flow::new();
        flow.begin_capture().expect("촬영 시작 실패");
        let completion = flow.devices_loaded(Ok(vec![])).expect("종료되어야 함");
        assert_eq!(completion.alert.as_deref(), Some(MSG_NO_IOT));
        assert!(flow.is_idle());
    }

    #[test]
    fn test_device_fetch_failure_sets_banner() {
        let mut flow = Flow::new();
        flow.begin_capture().expect("촬영 시작 실패");
        let completion = flow
            .devices_loaded(Err("connection refused".into()))
            .expect("종료되어야 함");
        assert_eq!(completion.banner.as_deref(), Some(MSG_IOT_LIST_FAILED));
        assert!(completion.alert.is_none());
        assert!(flow.is_idle());
    }

    #[test]
    fn test_confirm_without_device() {
        let mut flow = Flow::new();
        flow.begin_capture().expect("촬영 시작 실패");
        flow.devices_loaded(Ok(vec![device(1)]));
        assert_eq!(flow.confirm_device(), Err(WorkflowError::NoDeviceSelected));
        assert!(!flow.choose_device(99));
    }

    #[test]
    fn test_capture_target_toggle() {
        let mut flow = Flow::new();
        capture_ready(&mut flow);
        flow.select_group(&group(3, 1));
        assert_eq!(flow.target_id(), Some(3));
        flow.select_group(&group(3, 1));
        assert_eq!(flow.target_id(), None);
        flow.select_group(&group(3, 1));
        flow.select_group(&group(4, 2));
        assert_eq!(flow.target_id(), Some(4));
    }

    #[test]
    fn test_capture_success_reloads() {
        let mut flow = Flow::new();
        capture_ready(&mut flow);
        assert_eq!(flow.capture_request(), Err(WorkflowError::NoCaptureTarget));

        flow.select_group(&group(3, 1));
        let request = flow.capture_request().expect("요청 생성 실패");
        assert_eq!(request, CaptureRequest { group_id: 3, iot_id: 7 });
        assert!(flow.is_in_flight());

        // 제출 중에는 취소 무시
        assert!(!flow.cancel());

        let completion = flow.capture_finished(CaptureOutcome::Accepted);
        assert_eq!(completion.alert.as_deref(), Some(MSG_CAPTURE_SENT));
        assert_eq!(completion.reload_after, Some(CAPTURE_RELOAD_DELAY));
        assert!(flow.is_idle());
    }

    #[test]
    fn test_capture_rejected_alerts_server_message() {
        let mut flow = Flow::new();
        capture_ready(&mut flow);
        flow.select_group(&group(3, 1));
        flow.capture_request().expect("요청 생성 실패");
        let completion = flow.capture_finished(CaptureOutcome::Rejected("busy".into()));
        assert!(completion.alert.as_deref().unwrap_or_default().contains("busy"));
        assert_eq!(completion.reload_after, None);
        assert!(flow.is_idle());
    }

    #[test]
    fn test_capture_network_failure() {
        let mut flow = Flow::new();
        capture_ready(&mut flow);
        flow.select_group(&group(3, 1));
        flow.capture_request().expect("요청 생성 실패");
        let completion = flow.capture_finished(CaptureOutcome::Network("timeout".into()));
        assert_eq!(completion.banner.as_deref(), Some(MSG_CAPTURE_NETWORK_BANNER));
        assert_eq!(completion.alert.as_deref(), Some(MSG_NETWORK_ERROR));
    }

    #[test]
    fn test_only_one_modal() {
        let mut flow = Flow::new();
        flow.begin_capture().expect("촬영 시작 실패");
        assert!(flow.is_modal_open());
        assert_eq!(
            flow.begin_upload(),
            Err(WorkflowError::InvalidTransition("upload"))
        );
        assert!(flow.begin_capture().is_err());
    }

    // =============================================
    // 업로드
    // =============================================

    #[test]
    fn test_upload_zero_files_rejected() {
        let mut flow = Flow::new();
        flow.begin_upload().expect("업로드 시작 실패");
        assert_eq!(flow.submit_upload(), Err(WorkflowError::NothingToUpload));

        flow.select_group(&group(2, 1));
        assert_eq!(flow.submit_upload(), Err(WorkflowError::NothingToUpload));
        assert_eq!(
            WorkflowError::NothingToUpload.to_string(),
            MSG_UPLOAD_PROMPT
        );
        // 상태 유지
        assert_eq!(flow.target_id(), Some(2));
    }

    #[test]
    fn test_upload_without_target_rejected() {
        let mut flow = Flow::new();
        flow.begin_upload().expect("업로드 시작 실패");
        flow.attach_files(vec!["a.jpg".into()]);
        assert_eq!(flow.submit_upload(), Err(WorkflowError::NothingToUpload));
    }

    #[test]
    fn test_upload_success() {
        let mut flow = Flow::new();
        flow.begin_upload().expect("업로드 시작 실패");
        flow.select_group(&group(2, 1));
        flow.attach_files(vec!["a.jpg".into(), "b.jpg".into()]);

        let submission = flow.submit_upload().expect("제출 실패");
        assert_eq!(submission.group_id, 2);
        assert_eq!(submission.files.len(), 2);
        assert!(flow.is_in_flight());
        assert!(!flow.select_group(&group(5, 2)));

        let analysis = UploadAnalysis {
            total_files: 2,
            total_ripe: 5,
            ..Default::default()
        };
        let completion = flow.upload_finished(UploadOutcome::Analyzed(analysis.clone()));
        assert_eq!(completion.alert.as_deref(), Some(MSG_UPLOAD_DONE));
        assert_eq!(completion.reload_after, Some(UPLOAD_RELOAD_DELAY));
        assert!(flow.is_idle());
        assert_eq!(flow.upload_summary(), Some(&analysis));
    }

    #[test]
    fn test_upload_failure_keeps_target_and_files() {
        let mut flow = Flow::new();
        flow.begin_upload().expect("업로드 시작 실패");
        flow.select_group(&group(2, 1));
        flow.attach_files(vec!["a.jpg".into()]);
        flow.submit_upload().expect("제출 실패");

        let completion = flow.upload_finished(UploadOutcome::Rejected("모델 오류".into()));
        assert_eq!(completion.alert.as_deref(), Some("분석 실패: 모델 오류"));
        assert_eq!(flow.target_id(), Some(2));
        assert_eq!(flow.files(), &["a.jpg".to_string()]);

        // 그대로 재시도 가능
        flow.submit_upload().expect("재제출 실패");
        let completion = flow.upload_finished(UploadOutcome::Network("offline".into()));
        assert_eq!(
            completion.alert.as_deref(),
            Some("업로드 중 오류가 발생했습니다: offline")
        );
        assert!(matches!(flow.state(), WorkflowState::ChoosingUploadTarget { .. }));
    }

    #[test]
    fn test_cancel_clears_selection() {
        let mut flow = Flow::new();
        flow.begin_upload().expect("업로드 시작 실패");
        flow.select_group(&group(2, 1));
        flow.attach_files(vec!["a.jpg".into()]);
        assert!(flow.cancel());
        assert!(flow.is_idle());
        assert!(flow.files().is_empty());
        assert_eq!(flow.target_id(), None);
    }

    #[test]
    fn test_begin_from_detail_drops_detail() {
        let mut flow = Flow::new();
        flow.select_group(&group(1, 2));
        flow.begin_upload().expect("업로드 시작 실패");
        assert!(flow.detail_group().is_none());
    }
}
