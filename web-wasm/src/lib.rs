//! Smart Farm Web App (Leptos + WASM)

mod api;
mod app;
pub mod bridge;
mod components;
pub mod config;
mod pages;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
