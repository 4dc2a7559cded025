//! End-to-end playback scenario over three segments.

mod common;

use storybar_sequencer::domain::segment::SegmentState;
use storybar_sequencer::domain::sequencer::PlaybackStatus;
use storybar_test_support::ListenerCall;

#[test]
fn test_advance_reverse_skip_and_complete() {
    // configure([1000, 2000, 1500]); start() — no notification on start.
    let mut h = common::harness(&[1000, 2000, 1500]);
    h.sequencer.start();
    assert!(h.listener.calls().is_empty());
    assert_eq!(h.sequencer.current(), Some(0));
    h.assert_invariants();

    // Segment 0 finishes naturally.
    h.run_for(1000);
    assert_eq!(h.listener.calls(), vec![ListenerCall::Next]);
    assert_eq!(h.sequencer.current(), Some(1));
    h.assert_invariants();

    // Reverse during segment 1.
    h.run_for(700);
    h.sequencer.reverse();
    assert_eq!(
        h.listener.calls(),
        vec![ListenerCall::Next, ListenerCall::Prev]
    );
    assert_eq!(h.sequencer.current(), Some(0));
    assert_eq!(h.sequencer.progress(), Some(0.0));
    assert_eq!(h.renderer.fill(0), Some(0.0));
    assert_eq!(h.renderer.fill(1), Some(0.0));
    assert_eq!(h.sequencer.segment_state(1), Some(SegmentState::Idle));
    h.assert_invariants();

    // Segment 0 finishes naturally again, after its full duration.
    h.run_for(999);
    assert_eq!(h.sequencer.current(), Some(0));
    h.run_for(1);
    assert_eq!(h.sequencer.current(), Some(1));
    assert_eq!(h.listener.count(ListenerCall::Next), 2);
    h.assert_invariants();

    // Skip segment 1.
    h.run_for(250);
    h.sequencer.skip();
    assert_eq!(h.sequencer.current(), Some(2));
    assert_eq!(h.listener.count(ListenerCall::Next), 3);
    assert_eq!(h.renderer.fill(1), Some(1.0));
    h.assert_invariants();

    // Segment 2 finishes naturally.
    h.run_for(1500);
    assert!(h.sequencer.is_completed());
    assert_eq!(h.sequencer.status(), PlaybackStatus::Completed);
    assert_eq!(h.sequencer.current(), Some(2));
    assert_eq!(
        h.listener.calls(),
        vec![
            ListenerCall::Next,
            ListenerCall::Prev,
            ListenerCall::Next,
            ListenerCall::Next,
            ListenerCall::Complete,
        ]
    );
    assert!(
        h.sequencer
            .segments()
            .iter()
            .all(|segment| segment.state == SegmentState::Finished)
    );
}
