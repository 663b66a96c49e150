//! ringlist Frontend Entry Point

mod app;
mod components;
mod context;
mod dialogs;
mod logging;
mod web_store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logging::init();
    mount_to_body(App);
}
