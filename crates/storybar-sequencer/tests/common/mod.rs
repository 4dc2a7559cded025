//! Shared helpers for sequencer integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use storybar_core::clock::Clock;
use storybar_sequencer::domain::segment::SegmentState;
use storybar_sequencer::domain::sequencer::StorySequencer;
use storybar_test_support::{ManualClock, RecordingListener, RecordingRenderer};

/// A configured (not started) sequencer with recording collaborators.
pub struct Harness {
    pub sequencer: StorySequencer,
    pub clock: Arc<ManualClock>,
    pub listener: RecordingListener,
    pub renderer: RecordingRenderer,
}

/// Builds a harness for segments of the given millisecond durations.
pub fn harness(durations_ms: &[u64]) -> Harness {
    let clock = Arc::new(ManualClock::new());
    let listener = RecordingListener::new();
    let renderer = RecordingRenderer::new();
    let mut sequencer = StorySequencer::with_renderer(clock.clone(), Box::new(renderer.clone()));
    sequencer.set_listener(listener.clone());
    let durations: Vec<Duration> = durations_ms
        .iter()
        .map(|ms| Duration::from_millis(*ms))
        .collect();
    sequencer.configure(&durations).unwrap();
    Harness {
        sequencer,
        clock,
        listener,
        renderer,
    }
}

impl Harness {
    /// Moves time forward by `ms`, firing every timer that falls due on the
    /// way, the way a scheduler would.
    pub fn run_for(&mut self, ms: u64) {
        let target = self.clock.now() + Duration::from_millis(ms);
        while let Some((deadline, token)) = self.sequencer.next_deadline() {
            if deadline > target {
                break;
            }
            let now = self.clock.now();
            self.clock.advance(deadline.saturating_duration_since(now));
            self.sequencer.fire(token);
        }
        let now = self.clock.now();
        self.clock.advance(target.saturating_duration_since(now));
    }

    /// Moves time forward without delivering any timer callback.
    pub fn wait_without_firing(&self, ms: u64) {
        self.clock.advance(Duration::from_millis(ms));
    }

    /// Asserts the segment-state invariants around the cursor.
    pub fn assert_invariants(&self) {
        let active = self
            .sequencer
            .segments()
            .iter()
            .filter(|segment| segment.is_active())
            .count();
        assert!(active <= 1, "more than one active segment");

        let Some(current) = self.sequencer.current() else {
            return;
        };
        for segment in self.sequencer.segments() {
            if segment.index < current {
                assert_eq!(segment.state, SegmentState::Finished, "segment {}", segment.index);
            } else if segment.index > current {
                assert_eq!(segment.state, SegmentState::Idle, "segment {}", segment.index);
            }
        }
    }
}
