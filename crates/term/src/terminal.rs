//! TerminalDisplay: a [`PixelDisplay`] drawn on the terminal.

use std::time::Instant;

use anyhow::Result;

use crate::display::{PixelDisplay, PixelGrid};
use crate::fb::FrameBuffer;
use crate::matrix_view::{MatrixView, Viewport};
use crate::render_throttle::RenderThrottle;
use crate::renderer::TerminalRenderer;

const REPAINT_INTERVAL_MS: u64 = 1000;

pub struct TerminalDisplay {
    grid: PixelGrid,
    view: MatrixView,
    fb: FrameBuffer,
    renderer: TerminalRenderer,
    throttle: RenderThrottle,
    started: Instant,
    viewport: Viewport,
}

impl TerminalDisplay {
    /// Switch the terminal to the alternate screen and raw mode.
    ///
    /// Callers must call [`TerminalDisplay::exit`] to restore it.
    pub fn enter(width: u8, height: u8) -> Result<Self> {
        let grid = PixelGrid::new(width, height)?;
        let mut renderer = TerminalRenderer::new();
        renderer.enter()?;
        Ok(Self {
            grid,
            view: MatrixView::default(),
            fb: FrameBuffer::new(0, 0),
            renderer,
            throttle: RenderThrottle::new(REPAINT_INTERVAL_MS),
            started: Instant::now(),
            viewport: current_viewport(),
        })
    }

    pub fn exit(&mut self) -> Result<()> {
        self.renderer.exit()
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }
}

impl PixelDisplay for TerminalDisplay {
    fn width(&self) -> u8 {
        self.grid.width()
    }

    fn height(&self) -> u8 {
        self.grid.height()
    }

    fn clear_all(&mut self) {
        self.grid.clear_all();
    }

    fn set_pixel(&mut self, x: i16, y: i16, on: bool) {
        self.grid.set_pixel(x, y, on);
    }

    fn refresh(&mut self) -> Result<()> {
        self.grid.refresh()?;

        let viewport = current_viewport();
        if viewport != self.viewport {
            self.viewport = viewport;
            self.renderer.invalidate();
            self.throttle.invalidate();
        }

        let now_ms = self.started.elapsed().as_millis() as u64;
        if !self.throttle.should_render(now_ms, self.grid.fingerprint()) {
            return Ok(());
        }
        self.view
            .render_into(self.grid.frame(), self.grid.width(), self.viewport, &mut self.fb);
        self.renderer.draw_swap(&mut self.fb)
    }
}

fn current_viewport() -> Viewport {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    Viewport::new(w, h)
}
