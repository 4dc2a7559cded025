//! Test listener — records every notification a sequencer delivers.

use std::sync::{Arc, Mutex};

use storybar_core::listener::StoriesListener;

/// One recorded notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerCall {
    /// `on_next` was called.
    Next,
    /// `on_prev` was called.
    Prev,
    /// `on_complete` was called.
    Complete,
}

/// A listener that appends each notification to a shared log.
///
/// Clones share the same log, so a test can hand one clone to the sequencer
/// and keep another for assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingListener {
    calls: Arc<Mutex<Vec<ListenerCall>>>,
}

impl RecordingListener {
    /// Create a listener with an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every notification received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn calls(&self) -> Vec<ListenerCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns how many times `call` was received.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn count(&self, call: ListenerCall) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == call).count()
    }

    fn record(&self, call: ListenerCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl StoriesListener for RecordingListener {
    fn on_next(&mut self) {
        self.record(ListenerCall::Next);
    }

    fn on_prev(&mut self) {
        self.record(ListenerCall::Prev);
    }

    fn on_complete(&mut self) {
        self.record(ListenerCall::Complete);
    }
}
