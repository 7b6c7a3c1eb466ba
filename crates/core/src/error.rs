//! Board construction errors.

use derive_more::{Display, Error};

use crate::types::MAX_DISPLAY_PIXELS;

/// A board size the display cannot address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// One of the dimensions is zero.
    #[display("board dimensions must be non-zero, got {width}x{height}")]
    Empty { width: u8, height: u8 },
    /// More cells than the display driver supports.
    #[display(
        "board {width}x{height} needs {} cells, display supports {}",
        *width as usize * *height as usize,
        MAX_DISPLAY_PIXELS
    )]
    TooLarge { width: u8, height: u8 },
}
