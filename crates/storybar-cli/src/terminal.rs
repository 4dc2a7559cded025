//! A one-line progress row drawn on the terminal.

use std::io::Write;

use storybar_core::renderer::ProgressRenderer;
use tracing::trace;

const CELL_WIDTH: usize = 12;

/// Draws every segment as a bar in a single, redrawn line.
#[derive(Debug)]
pub struct TerminalRenderer<W> {
    out: W,
    fills: Vec<f64>,
}

impl<W: Write + Send> TerminalRenderer<W> {
    /// Creates a renderer for `count` empty segments writing to `out`.
    #[must_use]
    pub fn new(out: W, count: usize) -> Self {
        Self {
            out,
            fills: vec![0.0; count],
        }
    }

    fn set(&mut self, index: usize, fill: f64) {
        let Some(slot) = self.fills.get_mut(index) else {
            trace!(segment = index, "fill for unknown segment ignored");
            return;
        };
        *slot = fill.clamp(0.0, 1.0);
        self.draw();
    }

    fn draw(&mut self) {
        let row = render_row(&self.fills);
        if let Err(err) = write!(self.out, "\r{row}").and_then(|()| self.out.flush()) {
            trace!(error = %err, "terminal write failed");
        }
    }
}

impl<W: Write + Send> ProgressRenderer for TerminalRenderer<W> {
    fn render_start(&mut self, index: usize) {
        self.set(index, 0.0);
    }

    fn render_progress(&mut self, index: usize, fraction: f64) {
        self.set(index, fraction);
    }

    fn render_force_state(&mut self, index: usize, at_max: bool) {
        self.set(index, if at_max { 1.0 } else { 0.0 });
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn render_row(fills: &[f64]) -> String {
    let mut row = String::with_capacity(fills.len() * (CELL_WIDTH + 2));
    for fill in fills {
        let filled = (fill * CELL_WIDTH as f64).round() as usize;
        row.push('[');
        row.extend(std::iter::repeat_n('#', filled));
        row.extend(std::iter::repeat_n('-', CELL_WIDTH - filled));
        row.push(']');
    }
    row
}
