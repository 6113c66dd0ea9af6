//! # messenger-client
//!
//! Leptos + WASM browser client for a cookie-authenticated messenger backend.
//! It lists contacts, shows the conversation with the selected contact, and
//! keeps it fresh by polling.
//!
//! All backend traffic and timing goes through [`controller::ChatController`],
//! whose collaborators are injected, so the whole client is testable natively.
//! Browser bindings are enabled by the `csr` feature.

pub mod app;
pub mod components;
pub mod config;
pub mod controller;
pub mod net;
pub mod pages;
pub mod poll;
pub mod state;
pub mod util;

#[cfg(test)]
mod test_support;

/// WASM entry point: install logging and mount the app.
///
/// Mounts into `#app` when the host page provides one, otherwise `<body>`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    use wasm_bindgen::JsCast;

    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("app"))
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok());

    match root {
        Some(el) => leptos::mount::mount_to(el, app::App).forget(),
        None => leptos::mount::mount_to_body(app::App),
    }
}
