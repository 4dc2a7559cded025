//! Clock abstraction for determinism.

use std::time::Instant;

/// Abstraction over monotonic time so elapsed-time bookkeeping can be
/// driven by a real clock, a runtime's virtual clock, or a test clock.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> Instant;
}

/// Production clock that delegates to the operating system's monotonic clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
