/// Domain Index Checker - browser dashboard
/// Built with Rust + WASM + Yew

pub mod api;
pub mod check_data;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod error;
pub mod links;
pub mod poller;
pub mod render;
pub mod storage;
pub mod ui;

use crate::config::AppConfig;
use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export the live domain counter for plain JavaScript pages
#[wasm_bindgen]
pub fn domain_count_label(text: &str) -> String {
    domain::domain_count_label(text)
}

// Mount the dashboard; `config` may be omitted for same-origin defaults
#[wasm_bindgen]
pub fn start_app(config: JsValue) {
    let config = AppConfig::from_js(config);
    log::info!("Starting dashboard, polling every {}ms", config.poll_interval_ms);
    yew::Renderer::<ui::app::App>::with_props(ui::app::AppProps { config }).render();
}
