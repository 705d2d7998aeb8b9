//! Phrase Hunter core crate.
//!
//! Browser hangman: a phrase is drawn at random from a fixed list and the
//! player uncovers it letter by letter with at most 5 misses. The round
//! state machine lives in [`game`] (pure Rust, natively testable); the DOM
//! surface and event wiring live in `web` and are reached through the
//! `start_game()` export.

use wasm_bindgen::prelude::*;

pub mod game;
mod web;

pub use game::{
    GameController, InputEvent, KEY_COUNT, MAX_MISSES, Outcome, PHRASES, Phase, Tile, TileKind,
    ViewModel,
};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Mount the game into the page and show the start overlay.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::start()
}

/// Current view state as JSON, for debugging from the browser console.
/// Returns "null" before `start_game()` has run.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn game_state_json() -> String {
    web::view_json().unwrap_or_else(|| "null".into())
}
