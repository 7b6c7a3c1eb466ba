//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the game and has no dependency on the
//! display, the controller or the clock:
//!
//! - **Deterministic**: the same seed produces the same sequence of pieces
//! - **Allocation-free**: the board is a fixed-capacity array sized per session
//! - **Total**: every move is validated before it is committed, so there is
//!   nothing to roll back
//!
//! # Module Structure
//!
//! - [`pieces`]: the seven shapes, pivot rotation and bounding boxes
//! - [`board`]: bitmap of settled cells, line detection and collapse
//! - [`game_state`]: active piece, spawn, validity check and the physics tick
//! - [`rng`]: seeded random source for piece selection
//!
//! # Game Rules
//!
//! - A new piece is centred horizontally and starts fully above the board
//! - Each tick moves the piece down one row, or lands it when it cannot move
//! - Completed rows are emptied on landing and removed on the following tick
//! - The game ends when a piece settles with any cell above the board
//!
//! # Example
//!
//! ```
//! use sporktris_core::{GameState, Phase, TickOutcome};
//!
//! let mut game = GameState::new(10, 20, 12345).unwrap();
//! assert_eq!(game.phase(), Phase::Spawning);
//!
//! game.spawn_piece();
//! game.try_move(-1, 0);
//! game.try_rotate(true);
//! assert_eq!(game.tick(), TickOutcome::Fell);
//! ```

pub mod board;
pub mod error;
pub mod game_state;
pub mod pieces;
pub mod rng;

pub use sporktris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use error::BoardError;
pub use game_state::{ActivePiece, GameState, Phase, TickOutcome};
pub use pieces::{catalog, Piece, Rect};
pub use rng::SimpleRng;
