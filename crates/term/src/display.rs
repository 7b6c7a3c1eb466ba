//! Pixel display capability consumed by the game loop.
//!
//! A display is a monochrome matrix of `width * height` pixels. Writes go to
//! a back buffer and become visible on `refresh`.

use anyhow::{ensure, Result};

use crate::types::MAX_DISPLAY_PIXELS;

pub trait PixelDisplay {
    fn width(&self) -> u8;

    fn height(&self) -> u8;

    /// Turn every pixel off in the back buffer.
    fn clear_all(&mut self);

    /// Set one pixel. Coordinates outside the matrix are ignored.
    fn set_pixel(&mut self, x: i16, y: i16, on: bool);

    /// Make the back buffer visible.
    fn refresh(&mut self) -> Result<()>;
}

/// In-memory pixel matrix with a back buffer and a committed frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u8,
    height: u8,
    pending: [bool; MAX_DISPLAY_PIXELS],
    shown: [bool; MAX_DISPLAY_PIXELS],
    refreshes: u64,
}

impl PixelGrid {
    pub fn new(width: u8, height: u8) -> Result<Self> {
        let len = width as usize * height as usize;
        ensure!(len > 0, "display {width}x{height} has no pixels");
        ensure!(
            len <= MAX_DISPLAY_PIXELS,
            "display {width}x{height} exceeds {MAX_DISPLAY_PIXELS} pixels"
        );
        Ok(Self {
            width,
            height,
            pending: [false; MAX_DISPLAY_PIXELS],
            shown: [false; MAX_DISPLAY_PIXELS],
            refreshes: 0,
        })
    }

    #[inline]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i16 || y >= self.height as i16 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Committed pixel at (x, y). Out of range reads as off.
    pub fn is_lit(&self, x: i16, y: i16) -> bool {
        self.index(x, y).is_some_and(|i| self.shown[i])
    }

    /// Back-buffer pixel at (x, y).
    pub fn pending_is_lit(&self, x: i16, y: i16) -> bool {
        self.index(x, y).is_some_and(|i| self.pending[i])
    }

    /// The committed frame in row-major order.
    pub fn frame(&self) -> &[bool] {
        &self.shown[..self.len()]
    }

    pub fn refresh_count(&self) -> u64 {
        self.refreshes
    }

    pub fn lit_count(&self) -> usize {
        self.frame().iter().filter(|&&p| p).count()
    }

    /// Committed frame as text rows, `#` lit and `.` off.
    pub fn to_rows(&self) -> Vec<String> {
        self.frame()
            .chunks(self.width as usize)
            .map(|row| row.iter().map(|&p| if p { '#' } else { '.' }).collect())
            .collect()
    }

    /// Stable FNV-1a hash of the committed frame.
    pub fn fingerprint(&self) -> u64 {
        const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
        const PRIME: u64 = 0x100000001b3;

        let mut state = OFFSET_BASIS;
        for byte in [self.width, self.height]
            .into_iter()
            .chain(self.frame().iter().map(|&p| p as u8))
        {
            state ^= byte as u64;
            state = state.wrapping_mul(PRIME);
        }
        state
    }
}

impl PixelDisplay for PixelGrid {
    fn width(&self) -> u8 {
        self.width
    }

    fn height(&self) -> u8 {
        self.height
    }

    fn clear_all(&mut self) {
        self.pending = [false; MAX_DISPLAY_PIXELS];
    }

    fn set_pixel(&mut self, x: i16, y: i16, on: bool) {
        if let Some(i) = self.index(x, y) {
            self.pending[i] = on;
        }
    }

    fn refresh(&mut self) -> Result<()> {
        self.shown = self.pending;
        self.refreshes += 1;
        Ok(())
    }
}
