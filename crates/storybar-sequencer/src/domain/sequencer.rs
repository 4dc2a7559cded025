//! Story sequencer — the state machine that plays a row of segments.
//!
//! Exactly one segment is active at a time. Its [`SegmentDriver`] is created
//! on activation and cancelled on every transition away, so a replaced
//! segment can never report a late finish. Skip and reverse are both
//! expressed as "force the active driver to finish" and flow through the
//! same finish handling as natural completion; the in-flight transition is
//! tagged on the active state until the follow-up segment has started.

use std::cmp::Ordering;
use std::fmt;
use std::mem;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use storybar_core::clock::Clock;
use storybar_core::error::ConfigError;
use storybar_core::listener::StoriesListener;
use storybar_core::renderer::{NullRenderer, ProgressRenderer};
use tracing::{debug, info, warn};

use super::config::SequencerConfig;
use super::driver::{DriverSignal, SegmentDriver, TimerToken};
use super::events::SequencerEvent;
use super::segment::{Segment, SegmentState};

/// Coarse playback status reported to hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackStatus {
    /// No segments yet.
    Unconfigured,
    /// Configured, not started.
    Ready,
    /// A segment is counting.
    Playing,
    /// A segment is frozen.
    Paused,
    /// Playback was abandoned; the cursor is kept for a later restart.
    Parked,
    /// The last segment finished.
    Completed,
    /// Torn down; only `configure` brings it back.
    Destroyed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Clear,
    Skip,
    Reverse,
}

#[derive(Debug)]
enum Playback {
    Unconfigured,
    Ready,
    Active {
        driver: SegmentDriver,
        pending: Pending,
    },
    Parked {
        current: usize,
    },
    Completed,
    Destroyed,
}

/// Plays a linear row of timed segments and notifies a single listener.
pub struct StorySequencer {
    clock: Arc<dyn Clock>,
    renderer: Box<dyn ProgressRenderer>,
    listener: Option<Box<dyn StoriesListener>>,
    segments: Vec<Segment>,
    playback: Playback,
    activations: u64,
}

impl StorySequencer {
    /// Creates an unconfigured sequencer that renders nowhere.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_renderer(clock, Box::new(NullRenderer))
    }

    /// Creates an unconfigured sequencer pushing fill levels to `renderer`.
    #[must_use]
    pub fn with_renderer(clock: Arc<dyn Clock>, renderer: Box<dyn ProgressRenderer>) -> Self {
        Self {
            clock,
            renderer,
            listener: None,
            segments: Vec::new(),
            playback: Playback::Unconfigured,
            activations: 0,
        }
    }

    /// Registers the listener, replacing any previous one.
    pub fn set_listener(&mut self, listener: impl StoriesListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Detaches the listener.
    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    /// Replaces the segment row and returns to the not-started state.
    ///
    /// Any active segment is cancelled without notification.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySequence`] for an empty row and
    /// [`ConfigError::NonPositiveDuration`] for a zero duration. The
    /// sequencer is left untouched on error.
    pub fn configure(&mut self, durations: &[Duration]) -> Result<(), ConfigError> {
        if durations.is_empty() {
            return Err(ConfigError::EmptySequence);
        }
        if let Some(index) = durations.iter().position(Duration::is_zero) {
            return Err(ConfigError::NonPositiveDuration { index });
        }

        self.cancel_active();
        self.segments = durations
            .iter()
            .enumerate()
            .map(|(index, duration)| Segment::new(index, *duration))
            .collect();
        self.playback = Playback::Ready;
        info!(segments = self.segments.len(), "story sequence configured");
        Ok(())
    }

    /// Configures `count` segments sharing one duration.
    ///
    /// # Errors
    ///
    /// Same as [`StorySequencer::configure`].
    pub fn configure_uniform(&mut self, count: usize, duration: Duration) -> Result<(), ConfigError> {
        self.configure(&vec![duration; count])
    }

    /// Configures from a [`SequencerConfig`].
    ///
    /// # Errors
    ///
    /// Same as [`StorySequencer::configure`].
    pub fn configure_from(&mut self, config: &SequencerConfig) -> Result<(), ConfigError> {
        self.configure(&config.durations())
    }

    /// Starts playback at the first segment.
    pub fn start(&mut self) {
        self.start_from(0);
    }

    /// Starts playback at `index`.
    ///
    /// Earlier segments are silently shown as finished; nothing is sent to
    /// the listener. Restarts if something is already playing. Ignored when
    /// unconfigured, destroyed, or `index` is out of range.
    pub fn start_from(&mut self, index: usize) {
        if matches!(self.playback, Playback::Unconfigured | Playback::Destroyed) {
            debug!(index, "start ignored: sequence not configured");
            return;
        }
        if index >= self.segments.len() {
            warn!(
                index,
                segments = self.segments.len(),
                "start ignored: index out of range"
            );
            return;
        }

        self.cancel_active();
        let renderer = self.renderer.as_mut();
        for segment in &mut self.segments {
            match segment.index.cmp(&index) {
                Ordering::Less => {
                    segment.state = SegmentState::Finished;
                    renderer.render_force_state(segment.index, true);
                }
                Ordering::Greater if segment.state != SegmentState::Idle => {
                    segment.state = SegmentState::Idle;
                    renderer.render_force_state(segment.index, false);
                }
                _ => {}
            }
        }

        debug!(index, "story sequence started");
        self.activate(index, Pending::Clear);
    }

    /// Finishes the active segment early, exactly as if its time ran out.
    pub fn skip(&mut self) {
        if self.begin_transition(Pending::Skip) {
            self.force_active(true);
        }
    }

    /// Empties the active segment and steps back to the previous one.
    ///
    /// On the first segment this restarts it in place without notifying.
    pub fn reverse(&mut self) {
        if self.begin_transition(Pending::Reverse) {
            self.force_active(false);
        }
    }

    /// Freezes the active segment.
    pub fn pause(&mut self) {
        let now = self.clock.now();
        let Playback::Active { driver, .. } = &mut self.playback else {
            debug!("pause ignored: no active segment");
            return;
        };
        if driver.pause(now) {
            self.segments[driver.index()].state = SegmentState::Paused;
            debug!(segment = driver.index(), "segment paused");
        }
    }

    /// Unfreezes the active segment.
    pub fn resume(&mut self) {
        let now = self.clock.now();
        let Playback::Active { driver, .. } = &mut self.playback else {
            debug!("resume ignored: no active segment");
            return;
        };
        if driver.resume(now) {
            self.segments[driver.index()].state = SegmentState::Running;
            debug!(segment = driver.index(), "segment resumed");
        }
    }

    /// Delivers a scheduled timer callback for the active segment.
    ///
    /// Tokens from cancelled, paused-over, or replaced drivers are dropped.
    pub fn fire(&mut self, token: TimerToken) {
        let now = self.clock.now();
        let signal = match &mut self.playback {
            Playback::Active { driver, .. } => driver.fire(token, now, self.renderer.as_mut()),
            _ => None,
        };
        if signal == Some(DriverSignal::Finished) {
            self.on_finished();
        }
    }

    /// Pushes the active segment's current fill level to the renderer.
    pub fn render_frame(&mut self) {
        if let Playback::Active { driver, .. } = &self.playback {
            driver.render(self.clock.now(), self.renderer.as_mut());
        }
    }

    /// Cancels the active segment without notifying and parks it at 0%.
    ///
    /// The cursor is kept so the host can later `start_from(current)`.
    pub fn abandon(&mut self) {
        let Some(current) = self.cancel_active() else {
            debug!("abandon ignored: no active segment");
            return;
        };
        self.renderer.render_force_state(current, false);
        self.playback = Playback::Parked { current };
        debug!(segment = current, "playback abandoned");
    }

    /// Cancels any active segment and detaches the listener. Idempotent.
    pub fn destroy(&mut self) {
        if matches!(self.playback, Playback::Destroyed) {
            return;
        }
        self.cancel_active();
        self.listener = None;
        self.playback = Playback::Destroyed;
        debug!("story sequence destroyed");
    }

    /// Number of configured segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True when no segments are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The configured segments in playback order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// State of segment `index`, if it exists.
    #[must_use]
    pub fn segment_state(&self, index: usize) -> Option<SegmentState> {
        self.segments.get(index).map(|segment| segment.state)
    }

    /// The cursor, or `None` before the first start.
    #[must_use]
    pub fn current(&self) -> Option<usize> {
        match &self.playback {
            Playback::Active { driver, .. } => Some(driver.index()),
            Playback::Parked { current } => Some(*current),
            Playback::Completed => self.segments.len().checked_sub(1),
            Playback::Unconfigured | Playback::Ready | Playback::Destroyed => None,
        }
    }

    /// True once the last segment has finished.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self.playback, Playback::Completed)
    }

    /// True while the active segment is frozen.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        matches!(&self.playback, Playback::Active { driver, .. } if driver.is_paused())
    }

    /// Coarse playback status.
    #[must_use]
    pub fn status(&self) -> PlaybackStatus {
        match &self.playback {
            Playback::Unconfigured => PlaybackStatus::Unconfigured,
            Playback::Ready => PlaybackStatus::Ready,
            Playback::Active { driver, .. } if driver.is_paused() => PlaybackStatus::Paused,
            Playback::Active { .. } => PlaybackStatus::Playing,
            Playback::Parked { .. } => PlaybackStatus::Parked,
            Playback::Completed => PlaybackStatus::Completed,
            Playback::Destroyed => PlaybackStatus::Destroyed,
        }
    }

    /// Fraction of the active segment elapsed.
    #[must_use]
    pub fn progress(&self) -> Option<f64> {
        match &self.playback {
            Playback::Active { driver, .. } => Some(driver.fraction(self.clock.now())),
            _ => None,
        }
    }

    /// When the active segment's timer is due, and the token to fire it with.
    #[must_use]
    pub fn next_deadline(&self) -> Option<(Instant, TimerToken)> {
        match &self.playback {
            Playback::Active { driver, .. } => driver.deadline(),
            _ => None,
        }
    }

    fn begin_transition(&mut self, kind: Pending) -> bool {
        let Playback::Active { pending, .. } = &mut self.playback else {
            debug!(?kind, "transition ignored: no active segment");
            return false;
        };
        if *pending != Pending::Clear {
            debug!(?kind, in_flight = ?pending, "transition ignored: another is in flight");
            return false;
        }
        *pending = kind;
        true
    }

    fn force_active(&mut self, at_max: bool) {
        let signal = match &mut self.playback {
            Playback::Active { driver, .. } => driver.force_finish(at_max, self.renderer.as_mut()),
            _ => None,
        };
        if signal == Some(DriverSignal::Finished) {
            self.on_finished();
        } else {
            self.settle();
        }
    }

    fn activate(&mut self, index: usize, pending: Pending) {
        self.activations += 1;
        let mut driver = SegmentDriver::new(index, self.segments[index].duration, self.activations);
        let started = driver.start(self.clock.now(), self.renderer.as_mut());
        self.segments[index].state = SegmentState::Running;
        self.playback = Playback::Active { driver, pending };
        if started == Some(DriverSignal::Started) {
            self.settle();
        }
    }

    fn settle(&mut self) {
        if let Playback::Active { pending, .. } = &mut self.playback {
            *pending = Pending::Clear;
        }
    }

    fn on_finished(&mut self) {
        let (index, pending) = match mem::replace(&mut self.playback, Playback::Ready) {
            Playback::Active { driver, pending } => (driver.index(), pending),
            other => {
                self.playback = other;
                return;
            }
        };
        if pending == Pending::Reverse {
            self.step_back(index);
        } else {
            self.step_forward(index, pending);
        }
    }

    fn step_forward(&mut self, index: usize, pending: Pending) {
        self.segments[index].state = SegmentState::Finished;
        let next = index + 1;
        if next < self.segments.len() {
            self.activate(next, pending);
            debug!(from = index, to = next, "advanced to next segment");
            self.notify(SequencerEvent::Next);
        } else {
            self.playback = Playback::Completed;
            info!(segments = self.segments.len(), "story sequence completed");
            self.notify(SequencerEvent::Complete);
        }
    }

    fn step_back(&mut self, index: usize) {
        self.segments[index].state = SegmentState::Idle;
        if let Some(prev) = index.checked_sub(1) {
            self.segments[prev].state = SegmentState::Idle;
            self.renderer.render_force_state(prev, false);
            self.activate(prev, Pending::Reverse);
            debug!(from = index, to = prev, "reversed to previous segment");
            self.notify(SequencerEvent::Prev);
        } else {
            self.activate(index, Pending::Reverse);
            debug!("restarted first segment");
        }
    }

    fn cancel_active(&mut self) -> Option<usize> {
        let Playback::Active { driver, .. } = &mut self.playback else {
            return None;
        };
        driver.cancel();
        let index = driver.index();
        self.segments[index].state = SegmentState::Idle;
        self.playback = Playback::Ready;
        Some(index)
    }

    fn notify(&mut self, event: SequencerEvent) {
        if let Some(listener) = self.listener.as_deref_mut() {
            event.dispatch(listener);
        }
    }
}

impl fmt::Debug for StorySequencer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorySequencer")
            .field("segments", &self.segments)
            .field("playback", &self.playback)
            .field("has_listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use storybar_test_support::{ManualClock, RecordingListener};

    use super::*;

    fn playing(durations_ms: &[u64]) -> (StorySequencer, RecordingListener) {
        let clock = Arc::new(ManualClock::new());
        let listener = RecordingListener::new();
        let mut sequencer = StorySequencer::new(clock);
        let durations: Vec<Duration> = durations_ms
            .iter()
            .map(|ms| Duration::from_millis(*ms))
            .collect();
        sequencer.configure(&durations).unwrap();
        sequencer.set_listener(listener.clone());
        sequencer.start();
        (sequencer, listener)
    }

    fn force_pending(sequencer: &mut StorySequencer, kind: Pending) {
        match &mut sequencer.playback {
            Playback::Active { pending, .. } => *pending = kind,
            other => panic!("expected an active segment, got {other:?}"),
        }
    }

    #[test]
    fn test_skip_while_skip_in_flight_is_ignored() {
        // Arrange
        let (mut sequencer, listener) = playing(&[1000, 1000, 1000]);
        force_pending(&mut sequencer, Pending::Skip);

        // Act
        sequencer.skip();
        sequencer.reverse();

        // Assert
        assert_eq!(sequencer.current(), Some(0));
        assert!(!sequencer.is_completed());
        assert!(listener.calls().is_empty());
        assert_eq!(sequencer.segment_state(0), Some(SegmentState::Running));
    }

    #[test]
    fn test_reverse_while_reverse_in_flight_is_ignored() {
        let (mut sequencer, listener) = playing(&[1000, 1000]);
        sequencer.skip();
        force_pending(&mut sequencer, Pending::Reverse);

        sequencer.reverse();
        sequencer.skip();

        assert_eq!(sequencer.current(), Some(1));
        assert_eq!(listener.calls().len(), 1);
    }

    #[test]
    fn test_pending_is_cleared_once_next_segment_starts() {
        let (mut sequencer, _listener) = playing(&[1000, 1000, 1000]);

        sequencer.skip();

        assert!(matches!(
            sequencer.playback,
            Playback::Active {
                pending: Pending::Clear,
                ..
            }
        ));
    }

    #[test]
    fn test_configure_error_leaves_state_untouched() {
        let (mut sequencer, _listener) = playing(&[1000, 1000]);

        let result = sequencer.configure(&[Duration::from_millis(5), Duration::ZERO]);

        assert_eq!(result, Err(ConfigError::NonPositiveDuration { index: 1 }));
        assert_eq!(sequencer.len(), 2);
        assert_eq!(sequencer.current(), Some(0));
    }
}
