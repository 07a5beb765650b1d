//! Guess the Color core crate.
//!
//! A target color is shown next to six shades of the same hue; the player
//! picks the match before the countdown runs out. Faster guesses score more,
//! wrong guesses cost points, and the best score is kept in `localStorage`.
//!
//! The color, scoring and session logic is plain Rust and tests natively.
//! `ui` is the only module that talks to the browser.

use wasm_bindgen::prelude::*;

pub mod color;
pub mod game;
pub mod random;
pub mod scoring;
pub mod storage;
mod ui;

pub use color::{HslColor, generate_main_color, generate_shades, pick_target};
pub use game::{Game, GameConfig, GameError, GameSnapshot, GuessOutcome, Phase};
pub use scoring::{Variant, apply_guess, points_for_correct};
pub use storage::{HighScoreStore, MemoryStore};
pub use ui::{start_game, start_game_with_variant};

#[cfg(feature = "serde_json")]
pub use ui::game_state_json;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
