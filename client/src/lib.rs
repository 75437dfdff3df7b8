//! # client
//!
//! Leptos + WASM frontend for account sign-in.
//!
//! This crate contains the typed bridge to browser-side JavaScript
//! (`interop`), form validation state with the server-error adapter
//! (`validation`), the account API client, and the pages that tie them
//! together.

pub mod app;
pub mod components;
pub mod interop;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;
pub mod validation;

/// WASM entry point: install panic/console hooks and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("mounting client");
    leptos::mount::mount_to_body(app::App);
}
