//! 작업 세션 테스트
//!
//! 가짜 API로 촬영/업로드 흐름과 새로고침 동작을 검증

use async_trait::async_trait;
use smartfarm::client::FarmApi;
use smartfarm::error::{Result, SmartFarmError};
use smartfarm::workspace::WorkspaceSession;
use smartfarm_common::crop::CropType;
use smartfarm_common::grid::GridResponse;
use smartfarm_common::types::{
    CaptureRequest, CropGroup, Farm, GreenhouseSummary, GroupsResponse, IotDevice, SensorReading,
    SensorStatus, UploadAnalysis,
};
use smartfarm_common::workflow::{
    CaptureOutcome, UploadOutcome, WorkflowError, WorkflowState, MSG_NO_IOT, MSG_UPLOAD_DONE,
};
use std::path::PathBuf;
use std::sync::Mutex;

#[derive(Default)]
struct Calls {
    grid: usize,
    capture: Vec<CaptureRequest>,
    upload: usize,
}

struct FakeFarm {
    groups: Vec<CropGroup>,
    devices: Vec<IotDevice>,
    capture: CaptureOutcome,
    upload: UploadOutcome,
    groups_fail: bool,
    calls: Mutex<Calls>,
}

impl FakeFarm {
    fn new() -> Self {
        Self {
            groups: vec![
                group(1, CropType::STRAWBERRY, 0),
                group(2, CropType::PATH, 1),
                group(3, CropType::TOMATO, 2),
            ],
            devices: vec![IotDevice { id: 10, name: "카메라 1".to_string() }],
            capture: CaptureOutcome::Accepted,
            upload: UploadOutcome::Analyzed(UploadAnalysis {
                total_files: 2,
                total_ripe: 5,
                total_unripe: 3,
                total_count: 8,
                has_rotten: "없음".to_string(),
            }),
            groups_fail: false,
            calls: Mutex::new(Calls::default()),
        }
    }

    fn grid_calls(&self) -> usize {
        self.calls.lock().unwrap().grid
    }
}

fn group(id: i64, crop: CropType, row: usize) -> CropGroup {
    CropGroup {
        id,
        group_cells: vec![[row, 0], [row, 1], [row, 2]],
        crop_type: crop,
        is_horizontal: true,
        ..Default::default()
    }
}

fn house() -> GreenhouseSummary {
    GreenhouseSummary {
        id: 5,
        name: "1동".to_string(),
    }
}

#[async_trait]
impl FarmApi for FakeFarm {
    async fn farm(&self, _farm_id: i64) -> Result<Farm> {
        Ok(Farm::default())
    }

    async fn greenhouses(&self, _farm_id: i64) -> Result<Vec<GreenhouseSummary>> {
        Ok(vec![house()])
    }

    async fn grid(&self, _greenhouse_id: i64) -> Result<GridResponse> {
        self.calls.lock().unwrap().grid += 1;
        Ok(GridResponse {
            grid_data: serde_json::json!([[1, 1, 1], [0, 0, 0], [2, 2, 2]]),
            num_rows: 3,
            num_cols: 3,
        })
    }

    async fn groups(&self, _greenhouse_id: i64) -> Result<GroupsResponse> {
        if self.groups_fail {
            return Err(SmartFarmError::Api(smartfarm_common::Error::Http {
                status: 500,
                message: "server".to_string(),
            }));
        }
        Ok(GroupsResponse {
            groups: self.groups.clone(),
            axis: None,
        })
    }

    async fn sensor(&self, _greenhouse_id: i64) -> Result<SensorReading> {
        Ok(SensorReading {
            temperature: Some(22.5),
            humidity: Some(61.0),
            ..Default::default()
        })
    }

    async fn iot_list(&self) -> Result<Vec<IotDevice>> {
        Ok(self.devices.clone())
    }

    async fn capture(&self, request: &CaptureRequest) -> CaptureOutcome {
        self.calls.lock().unwrap().capture.push(request.clone());
        self.capture.clone()
    }

    async fn upload(&self, _group_id: i64, _files: &[PathBuf]) -> UploadOutcome {
        self.calls.lock().unwrap().upload += 1;
        self.upload.clone()
    }
}

async fn open(api: &FakeFarm) -> WorkspaceSession<'_, FakeFarm> {
    WorkspaceSession::open(api, house())
        .await
        .expect("세션 시작 실패")
        .without_reload_delay()
}

/// 세션 시작 시 그리드/그룹/센서 로드
#[tokio::test]
async fn test_open_loads_house() {
    let api = FakeFarm::new();
    let session = open(&api).await;

    assert_eq!(api.grid_calls(), 1);
    assert_eq!(session.house.groups.len(), 3);
    assert!(session.house.grid.is_some());
    assert!(matches!(session.house.sensor, SensorStatus::Reading { .. }));
    assert!(session.banner.is_none());
    // 길은 선택 목록에서 제외
    let ids: Vec<i64> = session.house.selectable_groups().iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

/// 그룹 조회 실패는 배너만 남긴다
#[tokio::test]
async fn test_groups_failure_sets_banner() {
    let mut api = FakeFarm::new();
    api.groups_fail = true;
    let session = open(&api).await;

    assert!(session.house.groups.is_empty());
    assert!(session.house.grid.is_some());
    assert!(session.banner.is_some());
}

/// 촬영 성공 후 다시 불러온다
#[tokio::test]
async fn test_capture_success_reloads() {
    let api = FakeFarm::new();
    let mut session = open(&api).await;

    assert!(session.start_capture().await.unwrap().is_none());
    session.choose_device(10).unwrap();
    assert!(session.select_group(3).unwrap());

    let completion = session.submit_capture().await.unwrap();
    assert!(completion.alert.is_some());
    assert!(completion.reload_after.is_some());
    assert_eq!(api.grid_calls(), 2);
    assert_eq!(*session.workflow.state(), WorkflowState::Idle);

    let calls = api.calls.lock().unwrap();
    assert_eq!(calls.capture, vec![CaptureRequest { group_id: 3, iot_id: 10 }]);
}

/// 서버 거부 메시지는 알림에 포함, 새로고침 없음
#[tokio::test]
async fn test_capture_rejected() {
    let mut api = FakeFarm::new();
    api.capture = CaptureOutcome::Rejected("busy".to_string());
    let mut session = open(&api).await;

    session.start_capture().await.unwrap();
    session.choose_device(10).unwrap();
    session.select_group(1).unwrap();
    let completion = session.submit_capture().await.unwrap();

    assert!(completion.alert.unwrap().contains("busy"));
    assert!(completion.reload_after.is_none());
    assert_eq!(api.grid_calls(), 1);
    assert_eq!(*session.workflow.state(), WorkflowState::Idle);
}

/// IoT 기기가 없으면 촬영을 시작하지 않는다
#[tokio::test]
async fn test_capture_without_devices() {
    let mut api = FakeFarm::new();
    api.devices.clear();
    let mut session = open(&api).await;

    let completion = session.start_capture().await.unwrap().expect("알림 필요");
    assert_eq!(completion.alert.as_deref(), Some(MSG_NO_IOT));
    assert_eq!(*session.workflow.state(), WorkflowState::Idle);
}

/// 영역 없이 촬영 전송 불가
#[tokio::test]
async fn test_capture_requires_target() {
    let api = FakeFarm::new();
    let mut session = open(&api).await;

    session.start_capture().await.unwrap();
    session.choose_device(10).unwrap();
    // 같은 그룹을 두 번 누르면 해제
    session.select_group(1).unwrap();
    session.select_group(1).unwrap();
    assert_eq!(session.workflow.target_id(), None);

    let err = session.submit_capture().await.unwrap_err();
    assert!(matches!(err, SmartFarmError::Workflow(WorkflowError::NoCaptureTarget)));
    assert!(api.calls.lock().unwrap().capture.is_empty());
}

/// 길은 선택되지 않는다
#[tokio::test]
async fn test_path_group_not_selectable() {
    let api = FakeFarm::new();
    let mut session = open(&api).await;

    assert!(!session.select_group(2).unwrap());
    assert!(session.workflow.detail_group().is_none());
    assert!(matches!(
        session.select_group(99),
        Err(SmartFarmError::GroupNotFound(99))
    ));
}

/// 파일 없이 업로드하면 호출 없이 거부
#[tokio::test]
async fn test_upload_without_files() {
    let api = FakeFarm::new();
    let mut session = open(&api).await;

    session.begin_upload().unwrap();
    session.select_group(1).unwrap();
    let err = session.submit_upload().await.unwrap_err();

    assert!(matches!(err, SmartFarmError::Workflow(WorkflowError::NothingToUpload)));
    assert_eq!(api.calls.lock().unwrap().upload, 0);
}

/// 업로드 성공: 결과 요약 보관 후 새로고침
#[tokio::test]
async fn test_upload_success() {
    let api = FakeFarm::new();
    let mut session = open(&api).await;

    session.begin_upload().unwrap();
    session.select_group(3).unwrap();
    session.attach_files(vec![PathBuf::from("a.jpg"), PathBuf::from("b.jpg")]);
    let completion = session.submit_upload().await.unwrap();

    assert_eq!(completion.alert.as_deref(), Some(MSG_UPLOAD_DONE));
    assert_eq!(session.workflow.upload_summary().map(|s| s.total_count), Some(8));
    assert_eq!(api.grid_calls(), 2);
}

/// 업로드 실패: 대상과 파일 유지
#[tokio::test]
async fn test_upload_failure_keeps_selection() {
    let mut api = FakeFarm::new();
    api.upload = UploadOutcome::Rejected("형식 오류".to_string());
    let mut session = open(&api).await;

    session.begin_upload().unwrap();
    session.select_group(1).unwrap();
    session.attach_files(vec![PathBuf::from("a.jpg")]);
    let completion = session.submit_upload().await.unwrap();

    assert!(completion.alert.unwrap().contains("형식 오류"));
    assert_eq!(session.workflow.target_id(), Some(1));
    assert_eq!(session.workflow.files().len(), 1);
    assert_eq!(api.grid_calls(), 1);

    // 취소하면 Idle
    assert!(session.cancel());
    assert!(session.workflow.is_idle());
}
