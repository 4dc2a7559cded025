//! Timed segment driver — one pausable, cancelable countdown.
//!
//! A driver is created for a single activation of a single segment and is
//! discarded on every transition away from it. Time is never read here;
//! callers pass the current instant in, so the same driver works under a
//! system clock, a runtime's virtual clock, or a manual test clock.
//!
//! The countdown is realized by the host as a scheduled callback: the
//! driver publishes a deadline together with a [`TimerToken`], and the host
//! hands that token back through [`SegmentDriver::fire`] once the deadline
//! passes. Every start and resume re-arms with a fresh token, so callbacks
//! scheduled before a pause, a cancel, or a finish are recognised as stale
//! and dropped.

use std::time::{Duration, Instant};

use storybar_core::renderer::ProgressRenderer;
use tracing::trace;

/// Identifies one arming of one driver's timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    activation: u64,
    arm: u32,
}

/// Notification produced by a driver operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverSignal {
    /// The countdown began.
    Started,
    /// The countdown ended, naturally or forced.
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Running { resumed_at: Instant, banked: Duration },
    Paused { elapsed: Duration },
    Finished,
    Cancelled,
}

/// Countdown for one activation of one segment.
#[derive(Debug)]
pub struct SegmentDriver {
    index: usize,
    duration: Duration,
    activation: u64,
    arm: u32,
    phase: Phase,
}

impl SegmentDriver {
    /// Creates an idle driver for segment `index`.
    ///
    /// `activation` must be unique per sequencer so tokens from one
    /// activation can never match another's.
    #[must_use]
    pub fn new(index: usize, duration: Duration, activation: u64) -> Self {
        Self {
            index,
            duration,
            activation,
            arm: 0,
            phase: Phase::Idle,
        }
    }

    /// The segment this driver counts for.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Total duration of the countdown.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// True while counting.
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    /// True while frozen by [`SegmentDriver::pause`].
    #[must_use]
    pub fn is_paused(&self) -> bool {
        matches!(self.phase, Phase::Paused { .. })
    }

    /// True once finished or cancelled; every further call is a no-op.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        matches!(self.phase, Phase::Finished | Phase::Cancelled)
    }

    /// Begins counting from zero and reports [`DriverSignal::Started`].
    ///
    /// Only an idle driver starts; any other call returns `None`.
    pub fn start(
        &mut self,
        now: Instant,
        renderer: &mut dyn ProgressRenderer,
    ) -> Option<DriverSignal> {
        if self.phase != Phase::Idle {
            return None;
        }
        self.phase = Phase::Running {
            resumed_at: now,
            banked: Duration::ZERO,
        };
        self.arm += 1;
        renderer.render_start(self.index);
        Some(DriverSignal::Started)
    }

    /// Freezes elapsed time at `now`. Returns whether anything changed.
    pub fn pause(&mut self, now: Instant) -> bool {
        let Phase::Running { resumed_at, banked } = self.phase else {
            return false;
        };
        let elapsed = (banked + now.saturating_duration_since(resumed_at)).min(self.duration);
        self.phase = Phase::Paused { elapsed };
        true
    }

    /// Continues from the frozen elapsed point. Returns whether anything changed.
    pub fn resume(&mut self, now: Instant) -> bool {
        let Phase::Paused { elapsed } = self.phase else {
            return false;
        };
        self.phase = Phase::Running {
            resumed_at: now,
            banked: elapsed,
        };
        self.arm += 1;
        true
    }

    /// Active running time so far, capped at the duration.
    #[must_use]
    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.phase {
            Phase::Idle | Phase::Cancelled => Duration::ZERO,
            Phase::Running { resumed_at, banked } => {
                (banked + now.saturating_duration_since(resumed_at)).min(self.duration)
            }
            Phase::Paused { elapsed } => elapsed,
            Phase::Finished => self.duration,
        }
    }

    /// Fraction of the duration elapsed, in `[0.0, 1.0]`.
    #[must_use]
    pub fn fraction(&self, now: Instant) -> f64 {
        self.elapsed(now).as_secs_f64() / self.duration.as_secs_f64()
    }

    /// When the armed timer should fire, and the token to fire it with.
    ///
    /// `None` unless the driver is running.
    #[must_use]
    pub fn deadline(&self) -> Option<(Instant, TimerToken)> {
        let Phase::Running { resumed_at, banked } = self.phase else {
            return None;
        };
        let token = TimerToken {
            activation: self.activation,
            arm: self.arm,
        };
        Some((resumed_at + self.duration.saturating_sub(banked), token))
    }

    /// Delivers a scheduled timer callback.
    ///
    /// Returns [`DriverSignal::Finished`] exactly once, when `token` is the
    /// currently armed one and the full duration has run. Stale tokens and
    /// early wake-ups are dropped.
    pub fn fire(
        &mut self,
        token: TimerToken,
        now: Instant,
        renderer: &mut dyn ProgressRenderer,
    ) -> Option<DriverSignal> {
        let Some((deadline, armed)) = self.deadline() else {
            trace!(segment = self.index, "timer callback on idle driver dropped");
            return None;
        };
        if token != armed {
            trace!(segment = self.index, ?token, "stale timer callback dropped");
            return None;
        }
        if now < deadline {
            return None;
        }
        self.phase = Phase::Finished;
        renderer.render_progress(self.index, 1.0);
        Some(DriverSignal::Finished)
    }

    /// Pushes the current fill level to the renderer while counting.
    pub fn render(&self, now: Instant, renderer: &mut dyn ProgressRenderer) {
        if self.is_running() {
            renderer.render_progress(self.index, self.fraction(now));
        }
    }

    /// Jumps straight to the end, rendering 100% (`at_max`) or 0%.
    ///
    /// Reports [`DriverSignal::Finished`] only if the countdown was live;
    /// an idle or finished driver just renders, a cancelled one does nothing.
    pub fn force_finish(
        &mut self,
        at_max: bool,
        renderer: &mut dyn ProgressRenderer,
    ) -> Option<DriverSignal> {
        if self.phase == Phase::Cancelled {
            return None;
        }
        renderer.render_force_state(self.index, at_max);
        match self.phase {
            Phase::Running { .. } | Phase::Paused { .. } => {
                self.phase = Phase::Finished;
                Some(DriverSignal::Finished)
            }
            _ => None,
        }
    }

    /// Stops the countdown without reporting a finish.
    pub fn cancel(&mut self) {
        self.phase = Phase::Cancelled;
    }
}
