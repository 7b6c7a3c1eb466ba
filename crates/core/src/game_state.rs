//! Game state module - board, active piece and the fixed-tick physics
//!
//! One `tick` is one physics quantum: either the pending collapse of flashed
//! lines, or one row of gravity, or a landing. Player moves go through
//! [`GameState::try_move`] and [`GameState::try_rotate`], which share the same
//! validity check as gravity, so an invalid placement is never committed.

use arrayvec::ArrayVec;
use tracing::{debug, info};

use crate::board::Board;
use crate::error::BoardError;
use crate::pieces::Piece;
use crate::rng::SimpleRng;
use crate::types::PIECE_CELLS;

/// The falling piece and the board position of its local origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub piece: Piece,
    pub x: i16,
    pub y: i16,
}

impl ActivePiece {
    /// Cells in board coordinates (rows may be negative)
    pub fn cells(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.piece.cells_at(self.x, self.y)
    }
}

/// What the next physics tick will do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No active piece; one is drawn on the next loop iteration
    Spawning,
    /// Gravity applies to the active piece
    Falling,
    /// Flashed lines are removed on the next tick instead of gravity
    LinesPendingCollapse,
    /// Terminal
    GameOver,
}

/// Result of one physics tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing to do (no active piece, or the game is over)
    Idle,
    /// Flashed lines were removed
    Collapsed,
    /// The active piece moved down one row
    Fell,
    /// The active piece was committed to the board
    Landed {
        /// Rows that became full and were flashed, bottom to top
        lines: ArrayVec<u8, PIECE_CELLS>,
    },
    /// The piece settled partly above the board
    GameOver,
}

/// Complete state of one play session
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    rng: SimpleRng,
    active: Option<ActivePiece>,
    /// Rows were flashed by the last landing and await collapse
    clearing_lines: bool,
    game_over: bool,
    lines_cleared: u32,
    pieces_landed: u32,
}

impl GameState {
    /// Create a session on an empty board
    pub fn new(width: u8, height: u8, seed: u32) -> Result<Self, BoardError> {
        Ok(Self::with_board(Board::new(width, height)?, SimpleRng::new(seed)))
    }

    /// Create a session on an existing board
    pub fn with_board(board: Board, rng: SimpleRng) -> Self {
        Self {
            board,
            rng,
            active: None,
            clearing_lines: false,
            game_over: false,
            lines_cleared: 0,
            pieces_landed: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.clearing_lines {
            Phase::LinesPendingCollapse
        } else if self.active.is_none() {
            Phase::Spawning
        } else {
            Phase::Falling
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn needs_new_piece(&self) -> bool {
        self.active.is_none() && !self.game_over
    }

    pub fn lines_pending(&self) -> bool {
        self.clearing_lines
    }

    /// Lines flashed since the session started
    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn pieces_landed(&self) -> u32 {
        self.pieces_landed
    }

    /// Draw a random piece if one is needed. Returns true if a piece spawned.
    pub fn spawn_piece(&mut self) -> bool {
        if !self.needs_new_piece() {
            return false;
        }
        let piece = Piece::random(&mut self.rng);
        self.spawn(piece);
        true
    }

    /// Place `piece` at the spawn position, replacing any active piece.
    ///
    /// The piece is centred horizontally and its lowest cell sits one row
    /// above the board, so it falls into view.
    pub fn spawn(&mut self, piece: Piece) -> ActivePiece {
        let rect = piece.bounding_rect();
        let active = ActivePiece {
            piece,
            x: self.board.width() as i16 / 2 - rect.center_x(),
            y: -rect.y2 - 1,
        };
        debug!(shape = piece.shape.as_str(), x = active.x, y = active.y, "spawn");
        self.active = Some(active);
        active
    }

    /// Put a piece at an arbitrary position without validation
    pub fn set_active(&mut self, piece: Piece, x: i16, y: i16) {
        self.active = Some(ActivePiece { piece, x, y });
    }

    /// Whether `piece` may occupy board offset `(x, y)`.
    ///
    /// Cells above the board are allowed; the bounding box may not leave the
    /// board on the left, right or bottom, and no on-board cell may overlap an
    /// occupied one.
    pub fn is_valid_position(&self, piece: &Piece, x: i16, y: i16) -> bool {
        let rect = piece.bounding_rect();
        if rect.x + x < 0
            || rect.x2 + x >= self.board.width() as i16
            || rect.y2 + y >= self.board.height() as i16
        {
            return false;
        }
        piece
            .cells_at(x, y)
            .all(|(px, py)| py < 0 || !self.board.is_occupied(px, py))
    }

    /// Translate the active piece. Returns false (and changes nothing) if the
    /// target is invalid or there is no active piece.
    pub fn try_move(&mut self, dx: i16, dy: i16) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let (x, y) = (active.x + dx, active.y + dy);
        if !self.is_valid_position(&active.piece, x, y) {
            return false;
        }
        self.active = Some(ActivePiece { x, y, ..active });
        true
    }

    /// Rotate the active piece in place if the rotated snapshot fits.
    pub fn try_rotate(&mut self, clockwise: bool) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let rotated = active.piece.rotated(clockwise);
        if !self.is_valid_position(&rotated, active.x, active.y) {
            return false;
        }
        self.active = Some(ActivePiece {
            piece: rotated,
            ..active
        });
        true
    }

    /// Advance physics by one quantum
    pub fn tick(&mut self) -> TickOutcome {
        if self.game_over {
            return TickOutcome::Idle;
        }

        // The tick after a line flash only removes the flashed rows.
        if self.clearing_lines {
            self.board.collapse();
            self.clearing_lines = false;
            debug!("collapse");
            return TickOutcome::Collapsed;
        }

        let Some(active) = self.active else {
            return TickOutcome::Idle;
        };

        if self.try_move(0, 1) {
            TickOutcome::Fell
        } else {
            self.land(active)
        }
    }

    /// Commit a piece to the board and flash any rows it completes
    fn land(&mut self, active: ActivePiece) -> TickOutcome {
        let mut top = self.board.height() as i16;
        let mut lines = ArrayVec::<u8, PIECE_CELLS>::new();

        for (px, py) in active.cells() {
            top = top.min(py);
            if py >= 0 {
                self.board.set(px, py, true);
            }
        }

        // Rows are checked after every cell is in place; at most four distinct rows.
        let mut rows: ArrayVec<i16, PIECE_CELLS> = active.cells().map(|(_, py)| py).collect();
        rows.sort_unstable_by(|a, b| b.cmp(a));
        for (i, &row) in rows.iter().enumerate() {
            if row < 0 || (i > 0 && rows[i - 1] == row) {
                continue;
            }
            if self.board.line_is_full(row as usize) {
                self.board.clear_line(row as usize);
                self.clearing_lines = true;
                lines.push(row as u8);
            }
        }

        self.active = None;
        self.pieces_landed += 1;
        self.lines_cleared += lines.len() as u32;
        debug!(
            shape = active.piece.shape.as_str(),
            x = active.x,
            y = active.y,
            lines = lines.len(),
            "landed"
        );

        if top < 0 {
            self.game_over = true;
            info!(
                pieces = self.pieces_landed,
                lines = self.lines_cleared,
                "game over"
            );
            return TickOutcome::GameOver;
        }

        TickOutcome::Landed { lines }
    }
}
