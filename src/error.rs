use smartfarm_common::workflow::WorkflowError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SmartFarmError {
    #[error("설정 오류: {0}")]
    Config(String),

    #[error("파일을 찾을 수 없습니다: {0}")]
    FileNotFound(String),

    #[error("폴더를 찾을 수 없습니다: {0}")]
    FolderNotFound(String),

    #[error("이미지가 없습니다: {0}")]
    NoImagesFound(String),

    #[error("그룹을 찾을 수 없습니다: {0}")]
    GroupNotFound(i64),

    #[error("비닐하우스가 없습니다. 농장 {0}에 등록된 하우스를 확인하세요")]
    NoGreenhouse(i64),

    #[error("농장 ID가 필요합니다. `--farm` 또는 `smartfarm config --set-farm`으로 지정하세요")]
    MissingFarmId,

    #[error("잘못된 그리드 파일: {0}")]
    InvalidGrid(String),

    #[error("{0}")]
    Unavailable(String),

    #[error("저장 실패: {0}")]
    Save(String),

    #[error("요청 실패: {0}")]
    Request(#[from] reqwest::Error),

    #[error(transparent)]
    Api(#[from] smartfarm_common::Error),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error("입력 오류: {0}")]
    Prompt(String),

    #[error("JSON 파싱 오류: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO 오류: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SmartFarmError>;
