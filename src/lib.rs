//! Duck Arcade core crate.
//!
//! Two canvas games built on the same split: a pure engine (state + `tick` +
//! `render` onto a `Surface`) and a thin browser adapter that captures input,
//! schedules frames and mirrors the score into the page.
//!
//! - `rescue`: Duck Rescue, the trail-following chase game.
//! - `snake`: classic grid snake.

use wasm_bindgen::prelude::*;

pub mod frame;
pub mod geom;
pub mod rescue;
pub mod snake;
pub mod storage;
pub mod surface;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    // a second start hook (tests, hot reload) finds the logger already set
    console_log::init_with_level(level).ok();
}

/// Session lifecycle shared by both games.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Running,
    Paused,
    Ended,
}

/// Fresh RNG seed for a browser session. Falls back to the page clock if the
/// platform has no entropy source.
pub(crate) fn entropy_seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(err) => {
            log::warn!("[Arcade] getrandom failed ({err}), seeding from clock");
            web_sys::window()
                .and_then(|w| w.performance())
                .map(|p| p.now().to_bits())
                .unwrap_or(0x5eed)
        }
    }
}

// -----------------------------------------------------------------------------
// JS entrypoints
// -----------------------------------------------------------------------------

/// Start or restart Duck Rescue on the canvas with `canvas_id` (created if missing).
#[wasm_bindgen]
pub fn start_rescue(canvas_id: &str) -> Result<(), JsValue> {
    rescue::web::start(canvas_id, None)
}

/// Same as `start_rescue`, with rule overrides as JSON (any subset of
/// `RescueConfig`, e.g. `{"lives": null, "controls": "swipe"}`).
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_rescue_with_config(canvas_id: &str, json: &str) -> Result<(), JsValue> {
    let config = rescue::RescueConfig::from_json(json)
        .map_err(|e| JsValue::from_str(&format!("invalid rescue config: {e}")))?;
    rescue::web::start(canvas_id, Some(config))
}

#[wasm_bindgen]
pub fn toggle_rescue_pause() {
    rescue::web::toggle_pause();
}

#[wasm_bindgen]
pub fn start_snake(canvas_id: &str) -> Result<(), JsValue> {
    snake::web::start(canvas_id)
}

#[wasm_bindgen]
pub fn toggle_snake_pause() {
    snake::web::toggle_pause();
}

/// Steer the snake from on-screen buttons ("up", "down", "left", "right").
/// Returns false for an unknown direction name.
#[wasm_bindgen]
pub fn snake_turn(direction: &str) -> bool {
    snake::web::turn(direction)
}
