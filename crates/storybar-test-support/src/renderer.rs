//! Test renderer — records every fill command pushed by a sequencer.

use std::sync::{Arc, Mutex};

use storybar_core::renderer::ProgressRenderer;

/// One recorded renderer command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderCall {
    /// `render_start(index)`.
    Start(usize),
    /// `render_progress(index, fraction)`.
    Progress(usize, f64),
    /// `render_force_state(index, at_max)`.
    ForceState(usize, bool),
}

/// A renderer that appends each command to a shared log.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    calls: Arc<Mutex<Vec<RenderCall>>>,
}

impl RecordingRenderer {
    /// Create a renderer with an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every command received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Forgets everything recorded so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Returns the last fill level pushed for `index`, if any.
    ///
    /// A start counts as 0.0 and a forced state as 0.0 or 1.0.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn fill(&self, index: usize) -> Option<f64> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find_map(|call| match *call {
                RenderCall::Start(i) if i == index => Some(0.0),
                RenderCall::Progress(i, f) if i == index => Some(f),
                RenderCall::ForceState(i, at_max) if i == index => {
                    Some(if at_max { 1.0 } else { 0.0 })
                }
                _ => None,
            })
    }

    fn record(&self, call: RenderCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ProgressRenderer for RecordingRenderer {
    fn render_start(&mut self, index: usize) {
        self.record(RenderCall::Start(index));
    }

    fn render_progress(&mut self, index: usize, fraction: f64) {
        self.record(RenderCall::Progress(index, fraction));
    }

    fn render_force_state(&mut self, index: usize, at_max: bool) {
        self.record(RenderCall::ForceState(index, at_max));
    }
}
