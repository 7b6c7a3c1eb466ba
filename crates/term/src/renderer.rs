//! TerminalRenderer: flushes a matrix framebuffer to a real terminal.
//!
//! The first frame (and any frame after a size change) is a full redraw.
//! Later frames only rewrite the runs of cells that changed.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor, event,
    style::{Color, Colors, Print, ResetColor, SetColors},
    terminal, QueueableCommand,
};

use crate::fb::{Cell, FrameBuffer};

/// Colors for each glyph kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub border: Color,
    pub lit: Color,
    pub unlit: Color,
    /// Behind lit and unlit pixels
    pub matrix_bg: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            border: Color::Rgb {
                r: 200,
                g: 200,
                b: 200,
            },
            lit: Color::Rgb {
                r: 80,
                g: 220,
                b: 220,
            },
            unlit: Color::Rgb {
                r: 90,
                g: 90,
                b: 100,
            },
            matrix_bg: Color::Rgb {
                r: 30,
                g: 30,
                b: 40,
            },
        }
    }
}

impl Palette {
    pub fn colors(&self, cell: Cell) -> Colors {
        match cell {
            Cell::Blank => Colors::new(Color::Reset, Color::Reset),
            Cell::Border(_) => Colors::new(self.border, Color::Reset),
            Cell::Lit => Colors::new(self.lit, self.matrix_bg),
            Cell::Unlit => Colors::new(self.unlit, self.matrix_bg),
        }
    }
}

pub struct TerminalRenderer {
    stdout: io::Stdout,
    palette: Palette,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            palette: Palette::default(),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        encode_enter_into(&mut self.buf)?;
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        encode_exit_into(&mut self.buf)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `fb` and keep it as the diff base, handing back the previous frame.
    ///
    /// The caller's buffer is swapped with the renderer's copy, so one pair of
    /// buffers is reused for the whole session.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        match self.last.as_ref() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(prev, fb, &self.palette, &mut self.buf)?;
            }
            _ => encode_full_into(fb, &self.palette, &mut self.buf)?,
        }
        self.flush_buf()?;

        let mut prev = self
            .last
            .take()
            .unwrap_or_else(|| FrameBuffer::new(fb.width(), fb.height()));
        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Alternate screen, hidden cursor, and focus events so the keyboard can
/// drop held keys when the window loses focus.
fn encode_enter_into(out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::EnterAlternateScreen)?;
    out.queue(event::EnableFocusChange)?;
    out.queue(cursor::Hide)?;
    out.queue(terminal::DisableLineWrap)?;
    Ok(())
}

fn encode_exit_into(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?;
    out.queue(terminal::EnableLineWrap)?;
    out.queue(cursor::Show)?;
    out.queue(event::DisableFocusChange)?;
    out.queue(terminal::LeaveAlternateScreen)?;
    Ok(())
}

/// Queue colors for `cell` unless they are already active.
fn paint(out: &mut Vec<u8>, palette: &Palette, current: &mut Option<Colors>, cell: Cell) -> Result<()> {
    let colors = palette.colors(cell);
    if *current != Some(colors) {
        out.queue(SetColors(colors))?;
        *current = Some(colors);
    }
    out.queue(Print(cell.ch()))?;
    Ok(())
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(fb: &FrameBuffer, palette: &Palette, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut current = None;
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for &cell in fb.row(y) {
            paint(out, palette, &mut current, cell)?;
        }
    }
    out.queue(ResetColor)?;
    Ok(())
}

/// Encode only the changed runs of `next` relative to `prev` (same size).
pub fn encode_diff_into(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    palette: &Palette,
    out: &mut Vec<u8>,
) -> Result<()> {
    let mut current = None;
    for y in 0..next.height() {
        let row = next.row(y);
        for (start, len) in changed_runs(prev.row(y), row) {
            out.queue(cursor::MoveTo(start as u16, y))?;
            for &cell in &row[start..start + len] {
                paint(out, palette, &mut current, cell)?;
            }
        }
    }
    if current.is_some() {
        out.queue(ResetColor)?;
    }
    Ok(())
}

/// `(start, len)` of each maximal run where the rows differ.
///
/// Cells missing from `prev` count as changed.
fn changed_runs<'a>(prev: &'a [Cell], next: &'a [Cell]) -> impl Iterator<Item = (usize, usize)> + 'a {
    let differs = move |x: usize| prev.get(x) != Some(&next[x]);
    let mut x = 0;
    std::iter::from_fn(move || {
        while x < next.len() && !differs(x) {
            x += 1;
        }
        if x == next.len() {
            return None;
        }
        let start = x;
        while x < next.len() && differs(x) {
            x += 1;
        }
        Some((start, x - start))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    #[test]
    fn enter_and_exit_toggle_focus_reporting() {
        let mut out = Vec::new();
        encode_enter_into(&mut out).unwrap();
        assert!(text(&out).contains("\x1b[?1004h"));

        out.clear();
        encode_exit_into(&mut out).unwrap();
        assert!(text(&out).contains("\x1b[?1004l"));
    }

    #[test]
    fn full_redraw_prints_every_row() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.fill(0, 0, 2, 1, Cell::Lit);
        fb.set(0, 1, Cell::Border('└'));
        fb.set(1, 1, Cell::Border('┘'));

        let mut out = Vec::new();
        encode_full_into(&fb, &Palette::default(), &mut out).unwrap();
        let s = text(&out);
        assert!(s.contains("██"));
        assert!(s.contains("└┘"));
    }

    #[test]
    fn diff_of_identical_frames_prints_nothing() {
        let mut a = FrameBuffer::new(4, 2);
        a.fill(0, 0, 4, 2, Cell::Unlit);
        let b = a.clone();
        let mut out = Vec::new();
        encode_diff_into(&a, &b, &Palette::default(), &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn colors_change_only_between_glyph_kinds() {
        let mut fb = FrameBuffer::new(4, 1);
        fb.fill(0, 0, 4, 1, Cell::Lit);
        let mut out = Vec::new();
        encode_full_into(&fb, &Palette::default(), &mut out).unwrap();

        let mut expected = Vec::new();
        expected.queue(SetColors(Palette::default().colors(Cell::Lit))).unwrap();
        let set_lit = text(&expected);
        assert_eq!(text(&out).matches(set_lit.as_str()).count(), 1);
    }

    #[test]
    fn lit_and_unlit_share_matrix_background() {
        let palette = Palette::default();
        assert_eq!(
            palette.colors(Cell::Lit).background,
            palette.colors(Cell::Unlit).background
        );
        assert_eq!(palette.colors(Cell::Blank).foreground, Some(Color::Reset));
    }

    #[test]
    fn changed_runs_coalesce_adjacent_cells() {
        let a = [Cell::Unlit; 6];
        let mut b = a;
        b[1] = Cell::Lit;
        b[2] = Cell::Lit;
        b[5] = Cell::Lit;
        let runs: Vec<_> = changed_runs(&a, &b).collect();
        assert_eq!(runs, vec![(1, 2), (5, 1)]);
    }
}
