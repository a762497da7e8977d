//! # client
//!
//! Leptos + WASM frontend for the chat application: group chats discovered
//! by name and interest, and anonymous one-to-one matching.
//!
//! This crate contains pages, components, application state, and the REST
//! and live-feed networking layer. It is rendered on the server with the
//! `ssr` feature and hydrated in the browser with the `hydrate` feature.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
