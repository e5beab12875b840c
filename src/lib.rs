//! Zigzag Stairs core crate.
//!
//! A character climbs a random zig-zag staircase; each input either keeps the
//! current direction or turns around, and only the side the next step is on
//! counts. The lane generator and the session state machine are plain Rust and
//! run natively (tests, tooling); the `web` module wraps them for the browser
//! page, which owns all drawing and animation.

use wasm_bindgen::prelude::*;

pub mod config;
mod console_log;
pub mod error;
pub mod lane;
pub mod pacing;
pub mod session;
#[cfg(feature = "serde_json")]
pub mod web;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

pub use config::GameConfig;
pub use error::ConfigError;
pub use lane::{LaneGenerator, RandSource, Step, StepSource};
pub use pacing::InputGate;
pub use session::{Action, Facing, GameState, Outcome, Report, SeededSession, Session};
#[cfg(feature = "serde_json")]
pub use web::StairGame;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init() {
        log::debug!("console logger already installed: {err}");
    }
}

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game() -> Result<StairGame, JsValue> {
    web::start_game()
}
