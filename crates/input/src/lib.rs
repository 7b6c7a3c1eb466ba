//! Controller input (engine-facing).
//!
//! The game reads a controller as six boolean buttons refreshed once per loop
//! iteration. This crate defines that capability, the per-button repeat
//! limiter the game applies on top of it, and a keyboard implementation for
//! terminals built on `crossterm`.

pub mod controller;
pub mod debounce;
pub mod keyboard;
pub mod map;

pub use sporktris_types as types;

pub use controller::{ButtonState, Controller, ScriptedController};
pub use debounce::Debounce;
pub use keyboard::KeyboardController;
pub use map::{button_for_key, is_interrupt};
