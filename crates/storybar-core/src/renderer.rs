//! Progress rendering sink.

/// Write-only sink for per-segment fill levels.
///
/// Implementations draw nothing back into the sequencer; every call is a
/// push of state that the renderer may display however it likes.
pub trait ProgressRenderer: Send {
    /// Segment `index` has begun filling from 0%.
    fn render_start(&mut self, index: usize);

    /// Segment `index` is `fraction` of the way through, in `[0.0, 1.0]`.
    fn render_progress(&mut self, index: usize, fraction: f64);

    /// Segment `index` jumped to empty (`at_max == false`) or full.
    fn render_force_state(&mut self, index: usize, at_max: bool);
}

/// Renderer that discards everything, for headless sequencers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl ProgressRenderer for NullRenderer {
    fn render_start(&mut self, _index: usize) {}

    fn render_progress(&mut self, _index: usize, _fraction: f64) {}

    fn render_force_state(&mut self, _index: usize, _at_max: bool) {}
}
