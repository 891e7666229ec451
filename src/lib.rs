//! # ops-dashboard
//!
//! Leptos + WASM reactive layer for the transcription pipeline operations
//! dashboard. The server renders each page shell together with an inline JSON
//! configuration block; this crate mounts into it, keeps summaries, incident
//! feeds, job tables, and log timelines in sync with the backend, and submits
//! job, template, and settings mutations without page reloads.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: install diagnostics and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        leptos::logging::warn!("console logger already installed: {e}");
    }
    leptos::mount::mount_to_body(app::App);
}
