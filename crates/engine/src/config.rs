//! Session configuration.

use sporktris_core::{Board, BoardError};

use crate::types::{BOARD_HEIGHT, BOARD_WIDTH, MOVE_REPEAT_MS, ROTATE_REPEAT_MS, TICK_MS};

/// Board size and timing for one play session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub width: u8,
    pub height: u8,
    /// Physics quantum: one gravity step per `tick_ms`
    pub tick_ms: u64,
    /// Minimum interval between accepted left, right and down presses
    pub move_repeat_ms: u64,
    /// Minimum interval between accepted rotations
    pub rotate_repeat_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            tick_ms: TICK_MS,
            move_repeat_ms: MOVE_REPEAT_MS,
            rotate_repeat_ms: ROTATE_REPEAT_MS,
        }
    }
}

impl SessionConfig {
    pub fn with_size(mut self, width: u8, height: u8) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_tick_ms(mut self, tick_ms: u64) -> Self {
        self.tick_ms = tick_ms;
        self
    }

    /// Check that the board fits the display
    pub fn validate(&self) -> Result<(), BoardError> {
        Board::check_size(self.width, self.height)
    }
}
