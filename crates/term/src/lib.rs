//! Terminal pixel display.
//!
//! The game draws into a monochrome pixel matrix through [`PixelDisplay`].
//! [`PixelGrid`] keeps that matrix in memory; [`TerminalDisplay`] also paints
//! it on the terminal, two columns per pixel inside a border, through a
//! framebuffer that is diffed against the previous frame.

pub mod display;
pub mod fb;
pub mod matrix_view;
pub mod render_throttle;
pub mod renderer;
pub mod terminal;

pub use sporktris_types as types;

pub use display::{PixelDisplay, PixelGrid};
pub use fb::{Cell, FrameBuffer};
pub use matrix_view::{MatrixView, Viewport};
pub use render_throttle::RenderThrottle;
pub use renderer::{encode_diff_into, encode_full_into, Palette, TerminalRenderer};
pub use terminal::TerminalDisplay;
