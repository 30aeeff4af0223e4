//! # client
//!
//! Leptos + WASM frontend for the authentication app: sign-in, sign-up, and
//! password-reset pages over a single client-side auth store.
//!
//! `state` holds the UI-independent logic (auth state machine, form binder,
//! login flows) and is tested natively; `pages` and `components` render it.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered app.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
