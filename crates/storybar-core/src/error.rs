//! Configuration error types.

use thiserror::Error;

/// Error returned when a sequence cannot be configured.
///
/// Misuse of playback operations (skipping with nothing active, reversing a
/// completed sequence) is never an error; those calls are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No durations were supplied.
    #[error("a story sequence needs at least one segment")]
    EmptySequence,

    /// A segment was given a zero duration.
    #[error("segment {index} has a non-positive duration")]
    NonPositiveDuration {
        /// Position of the offending segment.
        index: usize,
    },
}
