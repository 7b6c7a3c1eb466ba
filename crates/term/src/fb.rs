//! Framebuffer of matrix glyphs.
//!
//! The terminal only ever shows a bordered pixel matrix, so a cell is one of
//! four glyph kinds rather than an arbitrary styled character. Colors are
//! chosen by the renderer's [`Palette`](crate::renderer::Palette).

/// What one terminal cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    /// Outside the matrix
    #[default]
    Blank,
    /// Box-drawing character of the frame
    Border(char),
    /// Part of a pixel that is on
    Lit,
    /// Part of a pixel that is off
    Unlit,
}

impl Cell {
    pub fn ch(self) -> char {
        match self {
            Cell::Blank => ' ',
            Cell::Border(ch) => ch,
            Cell::Lit => '█',
            Cell::Unlit => '·',
        }
    }
}

/// Row-major grid of [`Cell`]s sized to the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Blank; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize and blank every cell, keeping the allocation.
    pub fn reset(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells
            .resize(width as usize * height as usize, Cell::Blank);
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[y as usize * self.width as usize + x as usize])
    }

    /// Cells of row `y`; empty when out of range.
    pub fn row(&self, y: u16) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let w = self.width as usize;
        let start = y as usize * w;
        &self.cells[start..start + w]
    }

    /// Write `cell` over a rectangle, clipped to the buffer
    pub fn fill(&mut self, x: u16, y: u16, w: u16, h: u16, cell: Cell) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        if x >= x_end {
            return;
        }
        for row in y..y_end {
            let start = row as usize * self.width as usize;
            self.cells[start + x as usize..start + x_end as usize].fill(cell);
        }
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        self.fill(x, y, 1, 1, cell);
    }

    /// One line of text for row `y`.
    pub fn row_text(&self, y: u16) -> String {
        self.row(y).iter().map(|c| c.ch()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_writes_are_dropped() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.set(3, 0, Cell::Lit);
        fb.set(0, 2, Cell::Lit);
        assert!(fb.get(3, 0).is_none());
        assert_eq!(fb.row_text(0), "   ");
        assert_eq!(fb.row_text(1), "   ");
        assert!(fb.row(2).is_empty());
    }

    #[test]
    fn test_fill_clips_at_edges() {
        let mut fb = FrameBuffer::new(4, 2);
        fb.fill(2, 1, 5, 5, Cell::Lit);
        assert_eq!(fb.row_text(0), "    ");
        assert_eq!(fb.row_text(1), "  ██");
    }

    #[test]
    fn test_reset_blanks_and_resizes() {
        let mut fb = FrameBuffer::new(1, 1);
        fb.set(0, 0, Cell::Unlit);
        fb.reset(2, 1);
        assert_eq!(fb.width(), 2);
        assert_eq!(fb.row(0), &[Cell::Blank, Cell::Blank]);
    }
}
