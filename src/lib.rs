//! Interaction layer for the static brochure site. Compiles to wasm, attaches
//! to the exported document and drives the scroll reveal engine plus the small
//! page behaviors (accordion, navbar shadow, autoplay, lazy images, ...).

use log::Level;
use wasm_bindgen::prelude::*;

pub mod config;
mod dom;
mod layer;

pub mod reveal {
    pub mod annotate;
    pub mod engine;
    pub mod profile;
    pub mod progress;
}

mod handlers {
    pub mod accordion;
    pub mod autoplay;
    pub mod chrome;
    pub mod forms;
    pub mod lazy_images;
    pub mod menu;
    pub mod navbar;
    pub mod parallax;
    pub mod smooth_scroll;
    pub mod sticky_cta;
}

pub use layer::{mount, mount_with, InteractionLayer};

#[wasm_bindgen(start)]
fn start() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging; a second instantiation of the module keeps the
    // first logger.
    let _ = console_log::init_with_level(Level::Info);
}
