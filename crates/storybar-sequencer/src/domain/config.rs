//! Sequence configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Duration given to each segment when none is specified.
pub const DEFAULT_SEGMENT_DURATION: Duration = Duration::from_millis(2000);

/// Durations for a row of segments, in playback order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencerConfig {
    /// Per-segment durations in milliseconds.
    pub durations_ms: Vec<u64>,
}

impl SequencerConfig {
    /// A row of `count` segments that all share `duration`.
    #[must_use]
    pub fn uniform(count: usize, duration: Duration) -> Self {
        let ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        Self {
            durations_ms: vec![ms; count],
        }
    }

    /// A row of `count` segments using [`DEFAULT_SEGMENT_DURATION`].
    #[must_use]
    pub fn with_count(count: usize) -> Self {
        Self::uniform(count, DEFAULT_SEGMENT_DURATION)
    }

    /// The durations as [`Duration`] values.
    #[must_use]
    pub fn durations(&self) -> Vec<Duration> {
        self.durations_ms
            .iter()
            .map(|ms| Duration::from_millis(*ms))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_count_uses_default_duration() {
        let config = SequencerConfig::with_count(3);

        assert_eq!(config.durations(), vec![DEFAULT_SEGMENT_DURATION; 3]);
    }

    #[test]
    fn test_deserializes_from_json() {
        let config: SequencerConfig =
            serde_json::from_str(r#"{ "durations_ms": [500, 1000, 1500] }"#).unwrap();

        assert_eq!(
            config.durations(),
            vec![
                Duration::from_millis(500),
                Duration::from_millis(1000),
                Duration::from_millis(1500),
            ]
        );
    }
}
