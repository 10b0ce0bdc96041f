//! Smart Farm Common Library
//!
//! 웹(WASM)과 CLI에서 공유되는 타입과 화면 로직 (I/O 없음)

pub mod api;
pub mod crop;
pub mod detail;
pub mod encyclopedia;
pub mod error;
pub mod grid;
pub mod layout;
pub mod sequence;
pub mod statistics;
pub mod text;
pub mod types;
pub mod workflow;

pub use api::{Method, Route, DEFAULT_BASE_URL};
pub use crop::CropType;
pub use detail::GroupDetail;
pub use error::{Error, Result};
pub use grid::{compute_groups, parse_grid_data, EditMode, Grid, GridResponse, UpdateGreenhouseRequest};
pub use layout::{layout_segments, GroupLayout, SegmentLayout, StackDirection};
pub use sequence::{RequestSequencer, Ticket};
pub use text::{html_to_text, weather_icon};
pub use types::{CropGroup, Farm, GreenhouseSummary, GroupAxis, IotDevice};
pub use workflow::{CaptureOutcome, Completion, UploadOutcome, Workflow, WorkflowError, WorkflowState};
