pub mod app;
pub mod domain;
pub mod shared;

use shared::alert::{self, AlertManager, BrowserTimer};
use shared::config::AppConfig;
use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen]
pub fn hydrate() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    let config = AppConfig::load();
    log::debug!("frontend config: {:?}", config);
    alert::init(AlertManager::new(BrowserTimer).with_default_timeout(config.alert_timeout_ms));

    leptos::mount::mount_to_body(app::App);
}

#[wasm_bindgen(start)]
pub fn start() {
    hydrate();
}
