//! Game engine: the loop that ties rules, input and display together.
//!
//! A [`Session`] owns one [`GameState`](sporktris_core::GameState) and drives
//! it from a [`Controller`](sporktris_input::Controller) onto a
//! [`PixelDisplay`](sporktris_term::PixelDisplay), with time read from a
//! [`Clock`]. All three collaborators are traits so tests can script input,
//! capture frames in memory and step time by hand.

pub mod clock;
pub mod config;
pub mod render;
pub mod session;

pub use sporktris_types as types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::SessionConfig;
pub use render::render;
pub use session::Session;
