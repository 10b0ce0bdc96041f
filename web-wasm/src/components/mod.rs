//! UI 컴포넌트

pub mod bar_detail;
pub mod capture_area;
pub mod control_card;
pub mod grid_editor;
pub mod group_bars;
pub mod header;
pub mod iot_modal;
pub mod loading;
pub mod sensor_panel;
pub mod sidebar;
pub mod upload_area;
pub mod upload_modal;
pub mod weather_card;
