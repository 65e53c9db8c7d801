//! Code Breaker core crate.
//!
//! A small puzzle game about array operations: the player inserts and deletes
//! digits in a ten-slot array and runs an animated linear search until the
//! hidden target pattern turns up. Three levels, sixty seconds each.
//!
//! The game model in [`game`] is plain Rust and is driven entirely by the
//! caller (timestamps in, events out), so it runs natively under `cargo test`.
//! The `web` module is the browser adapter behind the wasm exports below.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod game;
pub mod input;
mod logging;
mod web;

pub use config::GameConfig;
pub use error::{GameError, GameResult};
pub use game::{GameEvent, GameSession, GameState, Outcome};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::start(GameConfig::default())
}

/// Start with a JSON config, e.g. `{"level_seconds": 90}`. Missing fields keep
/// their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let config = GameConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    web::start(config)
}

#[wasm_bindgen]
pub fn stop_game() {
    web::stop();
}
