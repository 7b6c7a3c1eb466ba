//! Core types module - shared data structures and constants
//!
//! Pure data with no external dependencies, shared by the game logic, the
//! input layer and the display layer.
//!
//! # Display Dimensions
//!
//! The game runs on a pixel matrix. One board cell maps to one pixel:
//!
//! - **Width**: 10 columns by default (indexed 0-9)
//! - **Height**: 20 rows by default (indexed 0-19)
//! - **Capacity**: at most [`MAX_DISPLAY_PIXELS`] cells in total
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 500 | Physics quantum (one gravity step) |
//! | `MOVE_REPEAT_MS` | 100 | Minimum interval between left/right/down moves |
//! | `ROTATE_REPEAT_MS` | 200 | Minimum interval between rotations |
//!
//! # Examples
//!
//! ```
//! use sporktris_types::{Button, ShapeId, BOARD_HEIGHT, BOARD_WIDTH, MAX_DISPLAY_PIXELS};
//!
//! assert_eq!(ShapeId::from_str("t"), Some(ShapeId::T));
//! assert_eq!(Button::A.repeat_ms(), 200);
//! assert!((BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize) <= MAX_DISPLAY_PIXELS);
//! ```

/// Largest number of pixels the display driver can address.
pub const MAX_DISPLAY_PIXELS: usize = 200;

/// Default board width in cells
pub const BOARD_WIDTH: u8 = 10;

/// Default board height in cells
pub const BOARD_HEIGHT: u8 = 20;

/// Physics quantum in milliseconds
pub const TICK_MS: u64 = 500;

/// Minimum interval between accepted translations (left, right, soft drop)
pub const MOVE_REPEAT_MS: u64 = 100;

/// Minimum interval between accepted rotations
pub const ROTATE_REPEAT_MS: u64 = 200;

/// Number of cells in every piece
pub const PIECE_CELLS: usize = 4;


/// The seven piece shapes
///
/// - **I**: straight bar, two orientations
/// - **O**: 2x2 square, never rotates
/// - **S** / **Z**: skewed pieces, two orientations each
/// - **J** / **L**: mirrored hooks, four orientations each
/// - **T**: four orientations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeId {
    I,
    J,
    S,
    O,
    L,
    Z,
    T,
}

impl ShapeId {
    /// Every shape, in catalog order
    pub const ALL: [ShapeId; 7] = [
        ShapeId::I,
        ShapeId::J,
        ShapeId::S,
        ShapeId::O,
        ShapeId::L,
        ShapeId::Z,
        ShapeId::T,
    ];

    /// Parse shape from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use sporktris_types::ShapeId;
    ///
    /// assert_eq!(ShapeId::from_str("i"), Some(ShapeId::I));
    /// assert_eq!(ShapeId::from_str("O"), Some(ShapeId::O));
    /// assert_eq!(ShapeId::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeId::I),
            "j" => Some(ShapeId::J),
            "s" => Some(ShapeId::S),
            "o" => Some(ShapeId::O),
            "l" => Some(ShapeId::L),
            "z" => Some(ShapeId::Z),
            "t" => Some(ShapeId::T),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeId::I => "i",
            ShapeId::J => "j",
            ShapeId::S => "s",
            ShapeId::O => "o",
            ShapeId::L => "l",
            ShapeId::Z => "z",
            ShapeId::T => "t",
        }
    }
}

/// Controller buttons read by the game
///
/// A and B rotate clockwise and counter-clockwise; Start leaves the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Left,
    Right,
    Down,
    A,
    B,
    Start,
}

impl Button {
    pub const COUNT: usize = 6;

    pub const ALL: [Button; Button::COUNT] = [
        Button::Left,
        Button::Right,
        Button::Down,
        Button::A,
        Button::B,
        Button::Start,
    ];

    /// Dense index, usable for per-button tables
    pub const fn index(self) -> usize {
        match self {
            Button::Left => 0,
            Button::Right => 1,
            Button::Down => 2,
            Button::A => 3,
            Button::B => 4,
            Button::Start => 5,
        }
    }

    /// Minimum interval between two accepted presses of this button.
    ///
    /// Start is never debounced.
    pub const fn repeat_ms(self) -> u64 {
        match self {
            Button::Left | Button::Right | Button::Down => MOVE_REPEAT_MS,
            Button::A | Button::B => ROTATE_REPEAT_MS,
            Button::Start => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Button::Left => "left",
            Button::Right => "right",
            Button::Down => "down",
            Button::A => "a",
            Button::B => "b",
            Button::Start => "start",
        }
    }
}

/// How a play session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The player pressed Start
    Exited,
    /// A piece settled above the top of the board
    GameOver,
}

impl PlayOutcome {
    /// True when the player asked to leave
    pub fn exit_requested(&self) -> bool {
        matches!(self, PlayOutcome::Exited)
    }
}
