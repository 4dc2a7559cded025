//! Test clock — deterministic `Clock` implementation for tests.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use storybar_core::clock::Clock;

/// A clock that only moves when told to.
///
/// Starts at the instant it was created and advances exclusively through
/// [`ManualClock::advance`], so elapsed-time arithmetic in tests is exact.
#[derive(Debug)]
pub struct ManualClock(Mutex<Instant>);

impl ManualClock {
    /// Create a clock frozen at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self(Mutex::new(Instant::now()))
    }

    /// Move the clock forward by `by`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn advance(&self, by: Duration) {
        let mut now = self.0.lock().unwrap();
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.0.lock().unwrap()
    }
}
