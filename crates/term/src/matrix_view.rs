//! MatrixView: maps a pixel frame into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::fb::{Cell, FrameBuffer};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Draws a bordered pixel matrix centered in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixView {
    /// Pixel width in terminal columns.
    cell_w: u16,
    /// Pixel height in terminal rows.
    cell_h: u16,
}

impl Default for MatrixView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl MatrixView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Terminal size of the bordered matrix.
    pub fn frame_size(&self, width: u8, height: u8) -> (u16, u16) {
        (
            width as u16 * self.cell_w + 2,
            height as u16 * self.cell_h + 2,
        )
    }

    /// Render `pixels` (row-major, `width` per row) into an existing framebuffer.
    ///
    /// The framebuffer is reset to the viewport size, so one buffer can be
    /// reused across frames.
    pub fn render_into(
        &self,
        pixels: &[bool],
        width: u8,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.reset(viewport.width, viewport.height);

        if width == 0 {
            return;
        }
        let height = (pixels.len() / width as usize) as u8;
        let (frame_w, frame_h) = self.frame_size(width, height);
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        self.draw_border(fb, start_x, start_y, frame_w, frame_h);

        for (i, &on) in pixels.iter().enumerate() {
            let x = (i % width as usize) as u16;
            let y = (i / width as usize) as u16;
            let px = start_x + 1 + x * self.cell_w;
            let py = start_y + 1 + y * self.cell_h;
            let cell = if on { Cell::Lit } else { Cell::Unlit };
            fb.fill(px, py, self.cell_w, self.cell_h, cell);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, pixels: &[bool], width: u8, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(pixels, width, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        if w < 2 || h < 2 {
            return;
        }
        let (right, bottom) = (x + w - 1, y + h - 1);
        fb.set(x, y, Cell::Border('┌'));
        fb.set(right, y, Cell::Border('┐'));
        fb.set(x, bottom, Cell::Border('└'));
        fb.set(right, bottom, Cell::Border('┘'));
        fb.fill(x + 1, y, w - 2, 1, Cell::Border('─'));
        fb.fill(x + 1, bottom, w - 2, 1, Cell::Border('─'));
        fb.fill(x, y + 1, 1, h - 2, Cell::Border('│'));
        fb.fill(right, y + 1, 1, h - 2, Cell::Border('│'));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_size_includes_border() {
        let view = MatrixView::default();
        assert_eq!(view.frame_size(10, 20), (22, 22));
    }

    #[test]
    fn test_lit_pixel_is_two_columns_wide() {
        let mut pixels = vec![false; 6];
        pixels[4] = true; // (1, 1) on a 3x2 matrix
        let view = MatrixView::default();
        let fb = view.render(&pixels, 3, Viewport::new(8, 4));

        assert_eq!(fb.row_text(0), "┌──────┐");
        assert_eq!(fb.row_text(1), "│······│");
        assert_eq!(fb.row_text(2), "│··██··│");
        assert_eq!(fb.row_text(3), "└──────┘");
    }

    #[test]
    fn test_matrix_is_centered() {
        let pixels = [false; 1];
        let fb = MatrixView::default().render(&pixels, 1, Viewport::new(8, 5));
        // 4x3 frame in 8x5: start at (2, 1).
        assert_eq!(fb.get(2, 1).map(Cell::ch), Some('┌'));
        assert_eq!(fb.get(5, 3).map(Cell::ch), Some('┘'));
    }

    #[test]
    fn test_rerender_into_smaller_viewport_drops_old_frame() {
        let pixels = [true; 4];
        let view = MatrixView::default();
        let mut fb = view.render(&pixels, 2, Viewport::new(10, 6));
        view.render_into(&[false; 4], 2, Viewport::new(6, 4), &mut fb);

        assert_eq!((fb.width(), fb.height()), (6, 4));
        assert_eq!(fb.row_text(1), "│····│");
        assert_eq!(fb.get(1, 1), Some(Cell::Unlit));
    }
}
