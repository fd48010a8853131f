//! Browser entry point. Build with `trunk serve` from this crate.

mod app;
mod components;
mod pages;

fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    leptos::mount::mount_to_body(app::App);
}
