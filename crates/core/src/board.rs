//! Board module - the grid of settled cells
//!
//! The board is a fixed-capacity bitmap sized once per session from the
//! display dimensions. Storage is a flat row-major array (y * width + x) of
//! `MAX_DISPLAY_PIXELS` cells; only the first `width * height` are used.
//! Coordinates: x grows left to right, y grows top to bottom.

use crate::error::BoardError;
use crate::types::MAX_DISPLAY_PIXELS;

/// The grid of settled cells for one play session
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: [bool; MAX_DISPLAY_PIXELS],
}

impl Board {
    /// Check that a `width` x `height` board fits the display
    pub fn check_size(width: u8, height: u8) -> Result<(), BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::Empty { width, height });
        }
        if width as usize * height as usize > MAX_DISPLAY_PIXELS {
            return Err(BoardError::TooLarge { width, height });
        }
        Ok(())
    }

    /// Create an empty board
    pub fn new(width: u8, height: u8) -> Result<Self, BoardError> {
        Self::check_size(width, height)?;
        Ok(Self {
            width,
            height,
            cells: [false; MAX_DISPLAY_PIXELS],
        })
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if x < 0 || x >= self.width as i16 || y < 0 || y >= self.height as i16 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    #[inline(always)]
    fn row(&self, y: usize) -> std::ops::Range<usize> {
        let width = self.width as usize;
        y * width..(y + 1) * width
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Check if position is occupied. Out-of-range positions read as empty.
    pub fn is_occupied(&self, x: i16, y: i16) -> bool {
        self.index(x, y).is_some_and(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i16, y: i16, occupied: bool) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = occupied;
                true
            }
            None => false,
        }
    }

    /// Check if a row is completely filled
    pub fn line_is_full(&self, y: usize) -> bool {
        if y >= self.height as usize {
            return false;
        }
        self.cells[self.row(y)].iter().all(|&c| c)
    }

    /// Check if a row has no occupied cell
    pub fn line_is_empty(&self, y: usize) -> bool {
        if y >= self.height as usize {
            return false;
        }
        self.cells[self.row(y)].iter().all(|&c| !c)
    }

    /// Empty a row in place without moving the rows above it.
    pub fn clear_line(&mut self, y: usize) {
        if y >= self.height as usize {
            return;
        }
        let row = self.row(y);
        self.cells[row].fill(false);
    }

    /// Remove every empty row and drop the rows above into the gaps.
    ///
    /// Scans bottom to top carrying the number of empty rows seen so far; each
    /// row is copied down by that amount, and the rows vacated at the top are
    /// zeroed.
    pub fn collapse(&mut self) {
        let width = self.width as usize;
        let height = self.height as usize;
        let mut shift = 0usize;

        for y in (0..height).rev() {
            if shift > 0 {
                // copy_within handles overlapping ranges safely
                let src = y * width;
                self.cells.copy_within(src..src + width, (y + shift) * width);
            }
            if self.line_is_empty(y) {
                shift += 1;
            }
        }

        self.cells[..shift * width].fill(false);
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells().iter().filter(|&&c| c).count()
    }

    /// Active cells, row-major
    pub fn cells(&self) -> &[bool] {
        &self.cells[..self.width as usize * self.height as usize]
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Build a board from text rows, `#` for occupied and anything else empty
    pub fn from_rows(rows: &[&str]) -> Result<Self, BoardError> {
        let height = rows.len().min(u8::MAX as usize) as u8;
        let width = rows
            .iter()
            .map(|r| r.chars().count())
            .max()
            .unwrap_or(0)
            .min(u8::MAX as usize) as u8;
        let mut board = Self::new(width, height)?;
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                board.set(x as i16, y as i16, ch == '#');
            }
        }
        Ok(board)
    }

    /// Render one text row per board row, `#` occupied, `.` empty
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height as usize)
            .map(|y| {
                self.cells[self.row(y)]
                    .iter()
                    .map(|&c| if c { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }
}
