//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keyboard keys, touch swipes)
//! - The JS-facing game handle on wasm32

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{InputAction, SwipeTracker, action_for_key, apply_action};
