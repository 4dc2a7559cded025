//! Segments — one timed unit per progress indicator.

use std::time::Duration;

use serde::Serialize;

/// Lifecycle of a single segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentState {
    /// Not yet played, or reset by a reverse.
    Idle,
    /// Its driver is counting.
    Running,
    /// Its driver is frozen.
    Paused,
    /// Played through (naturally, skipped, or caught up by `start_from`).
    Finished,
}

/// One timed unit in the playback sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Position in playback order.
    pub index: usize,
    /// How long the segment takes to fill.
    pub duration: Duration,
    /// Current lifecycle state.
    pub state: SegmentState,
}

impl Segment {
    /// Creates an idle segment.
    #[must_use]
    pub fn new(index: usize, duration: Duration) -> Self {
        Self {
            index,
            duration,
            state: SegmentState::Idle,
        }
    }

    /// True while this segment holds the active driver.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state, SegmentState::Running | SegmentState::Paused)
    }
}
