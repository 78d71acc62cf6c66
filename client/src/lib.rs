//! # client
//!
//! Leptos + WASM frontend for the Fitwell accessible fitness platform.
//!
//! This crate contains pages, components, the session/auth store, the
//! accessibility store, REST helpers and the storage port. The root `fitwell`
//! crate renders [`app::App`] on the server and the `hydrate` entry point below
//! takes over in the browser.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: installs logging and hydrates the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
