//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time/ticks (frame clock driven by requestAnimationFrame)
//! - Input events (keyboard to movement intents)
//! - Storage (LocalStorage on web)

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod storage;
pub mod time;

pub use input::{InputState, KeyBinding, binding_for};
pub use time::FrameClock;
