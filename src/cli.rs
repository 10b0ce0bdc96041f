use clap::{Parser, Subcommand, ValueEnum};
use smartfarm_common::encyclopedia::EntryKind;
use smartfarm_common::statistics::GraphKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "smartfarm")]
#[command(about = "스마트팜 비닐하우스 작업 클라이언트", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 상세 로그 출력
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// API 서버 주소 (설정 파일보다 우선)
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 농장 정보와 날씨
    Farm {
        /// 농장 ID (기본: 설정의 default_farm_id)
        #[arg(short, long)]
        farm: Option<i64>,
    },

    /// 비닐하우스 목록
    Greenhouses {
        #[arg(short, long)]
        farm: Option<i64>,
    },

    /// 그리드 코드 표
    Grid {
        /// 비닐하우스 ID
        greenhouse: i64,
    },

    /// 그룹 막대와 상세
    Groups {
        greenhouse: i64,

        /// 상세를 볼 그룹 ID
        #[arg(short, long)]
        detail: Option<i64>,
    },

    /// 하우스 환경 (온습도)
    Sensor {
        greenhouse: i64,
    },

    /// 도시 날씨
    Weather {
        /// 도시 이름 (기본: 농장 위치)
        city: Option<String>,

        #[arg(short, long)]
        farm: Option<i64>,
    },

    /// 대화형 작업 (그룹 선택 / 촬영 / 업로드)
    Workspace {
        #[arg(short, long)]
        farm: Option<i64>,

        /// 비닐하우스 ID (생략 시 선택)
        #[arg(short, long)]
        greenhouse: Option<i64>,
    },

    /// IoT 촬영 명령 전송
    Capture {
        greenhouse: i64,

        /// 촬영할 그룹 ID
        #[arg(short, long)]
        group: i64,

        /// IoT 기기 ID (생략 시 목록에서 선택)
        #[arg(short, long)]
        iot: Option<i64>,

        /// 전송 후 새로고침 대기 생략
        #[arg(long)]
        no_wait: bool,
    },

    /// 이미지 업로드 분석
    Upload {
        greenhouse: i64,

        /// 대상 그룹 ID
        #[arg(short, long)]
        group: i64,

        /// 이미지 파일 또는 폴더
        #[arg(required = true)]
        images: Vec<PathBuf>,

        #[arg(long)]
        no_wait: bool,
    },

    /// 그리드 JSON 파일을 적용 (저장 전 그룹 미리보기)
    Edit {
        greenhouse: i64,

        /// `[[0,1],[1,1]]` 형식의 JSON 파일
        grid_file: PathBuf,

        /// 하우스 이름 (생략 시 농장 목록에서 조회)
        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        farm: Option<i64>,

        /// 확인 없이 저장
        #[arg(short, long)]
        yes: bool,
    },

    /// 비닐하우스 삭제
    Delete {
        greenhouse: i64,

        #[arg(short, long)]
        yes: bool,
    },

    /// 작물 도감
    Encyclopedia {
        #[command(subcommand)]
        target: EncyclopediaTarget,
    },

    /// 시세 통계 (Plotly figure JSON 출력)
    Statistics {
        #[arg(short, long, default_value = "tomato_annual")]
        graph: GraphArg,

        /// 월별 그래프의 연도
        #[arg(short, long)]
        year: Option<u16>,

        /// figure JSON 저장 경로
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 설정 관리
    Config {
        /// API 서버 주소 설정
        #[arg(long)]
        set_base_url: Option<String>,

        /// 세션 쿠키 설정 (`session=...`)
        #[arg(long)]
        set_session: Option<String>,

        /// 기본 농장 ID 설정
        #[arg(long)]
        set_farm: Option<i64>,

        /// 설정 표시
        #[arg(long)]
        show: bool,
    },
}

#[derive(Subcommand)]
pub enum EncyclopediaTarget {
    /// 작물 (strawberry / tomato)
    Crop { crop: String },
    /// 병해 상세
    Disease { id: String },
    /// 해충 상세
    Insect { id: String },
    /// 천적 상세
    Enemy { id: String },
}

impl EncyclopediaTarget {
    /// 상세 항목이면 종류와 id
    pub fn entry(&self) -> Option<(EntryKind, &str)> {
        match self {
            EncyclopediaTarget::Crop { .. } => None,
            EncyclopediaTarget::Disease { id } => Some((EntryKind::Disease, id.as_str())),
            EncyclopediaTarget::Insect { id } => Some((EntryKind::Insect, id.as_str())),
            EncyclopediaTarget::Enemy { id } => Some((EntryKind::Enemy, id.as_str())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum GraphArg {
    TomatoAnnual,
    StrawberryAnnual,
    TomatoMonthlyWholesale,
    StrawberryMonthlyWholesale,
    TomatoMonthlyRetail,
    StrawberryMonthlyRetail,
}

impl From<GraphArg> for GraphKind {
    fn from(arg: GraphArg) -> Self {
        match arg {
            GraphArg::TomatoAnnual => GraphKind::TomatoAnnual,
            GraphArg::StrawberryAnnual => GraphKind::StrawberryAnnual,
            GraphArg::TomatoMonthlyWholesale => GraphKind::TomatoMonthlyWholesale,
            GraphArg::StrawberryMonthlyWholesale => GraphKind::StrawberryMonthlyWholesale,
            GraphArg::TomatoMonthlyRetail => GraphKind::TomatoMonthlyRetail,
            GraphArg::StrawberryMonthlyRetail => GraphKind::StrawberryMonthlyRetail,
        }
    }
}
