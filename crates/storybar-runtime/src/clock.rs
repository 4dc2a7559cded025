//! Clock backed by tokio's time source.

use std::time::Instant;

use storybar_core::clock::Clock;

/// Reads time through tokio so paused or auto-advanced test time is seen by
/// the sequencer exactly as the timer wheel sees it.
#[derive(Debug, Clone, Copy)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}
