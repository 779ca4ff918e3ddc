mod app;
mod components;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
mod utils;

use app::App;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn run_app() {
    utils::set_panic_hook();
    utils::init_logging();
    yew::Renderer::<App>::new().render();
}
