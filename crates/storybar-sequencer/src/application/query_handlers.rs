//! Query handlers for the story sequencer.
//!
//! Read-only view DTOs describing where playback stands.

use serde::Serialize;

use crate::domain::segment::SegmentState;
use crate::domain::sequencer::{PlaybackStatus, StorySequencer};

/// Read-only view of one segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentView {
    /// Position in playback order.
    pub index: usize,
    /// Duration in milliseconds.
    pub duration_ms: u64,
    /// Lifecycle state.
    pub state: SegmentState,
}

/// Read-only view of a sequencer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequencerSnapshot {
    /// Coarse playback status.
    pub status: PlaybackStatus,
    /// Cursor, absent before the first start.
    pub current: Option<usize>,
    /// Fraction of the active segment elapsed.
    pub progress: Option<f64>,
    /// Every segment in playback order.
    pub segments: Vec<SegmentView>,
}

/// Captures the sequencer's current state.
#[must_use]
pub fn snapshot(sequencer: &StorySequencer) -> SequencerSnapshot {
    SequencerSnapshot {
        status: sequencer.status(),
        current: sequencer.current(),
        progress: sequencer.progress(),
        segments: sequencer
            .segments()
            .iter()
            .map(|segment| SegmentView {
                index: segment.index,
                duration_ms: u64::try_from(segment.duration.as_millis()).unwrap_or(u64::MAX),
                state: segment.state,
            })
            .collect(),
    }
}
