//! Render pass: game state to pixels.

use anyhow::Result;

use sporktris_core::GameState;
use sporktris_term::PixelDisplay;

/// Draw the settled cells and the active piece, then commit the frame.
///
/// Active cells above the board are passed through; the display clips them.
pub fn render<D: PixelDisplay + ?Sized>(state: &GameState, display: &mut D) -> Result<()> {
    display.clear_all();

    let board = state.board();
    let width = board.width() as usize;
    for (i, _) in board.cells().iter().enumerate().filter(|&(_, &c)| c) {
        display.set_pixel((i % width) as i16, (i / width) as i16, true);
    }

    if let Some(active) = state.active() {
        for (x, y) in active.cells() {
            display.set_pixel(x, y, true);
        }
    }

    display.refresh()
}
