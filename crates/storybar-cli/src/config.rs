//! Host configuration read from the environment.

use std::str::FromStr;
use std::time::Duration;

use storybar_runtime::player::DEFAULT_FRAME_INTERVAL;
use storybar_sequencer::domain::config::{DEFAULT_SEGMENT_DURATION, SequencerConfig};

use crate::error::AppError;

/// Segment count used when the environment names no story at all.
pub const DEFAULT_STORY_COUNT: usize = 3;

/// Everything the host needs to run one story row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Segment durations.
    pub story: SequencerConfig,
    /// Index playback starts at.
    pub start_from: usize,
    /// Renderer cadence.
    pub frame_interval: Duration,
}

impl CliConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an invalid value or the story
    /// file cannot be read or parsed.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`.
    ///
    /// The row comes from `STORY_FILE` if set, else `STORY_DURATIONS_MS`,
    /// else `STORY_COUNT` segments of `STORY_DURATION_MS` each.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an invalid value or the story
    /// file cannot be read or parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let story = if let Some(path) = lookup("STORY_FILE") {
            let text = std::fs::read_to_string(path)?;
            serde_json::from_str(&text)?
        } else if let Some(list) = lookup("STORY_DURATIONS_MS") {
            SequencerConfig {
                durations_ms: parse_durations(&list)?,
            }
        } else {
            let count = parse_var(&lookup, "STORY_COUNT")?.unwrap_or(DEFAULT_STORY_COUNT);
            let duration = parse_var(&lookup, "STORY_DURATION_MS")?
                .map_or(DEFAULT_SEGMENT_DURATION, Duration::from_millis);
            SequencerConfig::uniform(count, duration)
        };

        let start_from = parse_var(&lookup, "STORY_START_FROM")?.unwrap_or(0);

        let frame_interval = match parse_var::<u64>(&lookup, "FRAME_INTERVAL_MS")? {
            Some(0) => {
                return Err(AppError::Config(
                    "FRAME_INTERVAL_MS must be greater than zero".into(),
                ));
            }
            Some(ms) => Duration::from_millis(ms),
            None => DEFAULT_FRAME_INTERVAL,
        };

        Ok(Self {
            story,
            start_from,
            frame_interval,
        })
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| AppError::Config(format!("{key} must be a number: {e}")))
        })
        .transpose()
}

fn parse_durations(list: &str) -> Result<Vec<u64>, AppError> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse().map_err(|e| {
                AppError::Config(format!(
                    "STORY_DURATIONS_MS entry {item:?} is not a duration: {e}"
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = CliConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.story, SequencerConfig::with_count(DEFAULT_STORY_COUNT));
        assert_eq!(config.start_from, 0);
        assert_eq!(config.frame_interval, DEFAULT_FRAME_INTERVAL);
    }

    #[test]
    fn test_duration_list_wins_over_uniform_settings() {
        let config = CliConfig::from_lookup(lookup(&[
            ("STORY_DURATIONS_MS", "1000, 2000,1500"),
            ("STORY_COUNT", "9"),
        ]))
        .unwrap();

        assert_eq!(config.story.durations_ms, vec![1000, 2000, 1500]);
    }

    #[test]
    fn test_uniform_row_from_count_and_duration() {
        let config = CliConfig::from_lookup(lookup(&[
            ("STORY_COUNT", "4"),
            ("STORY_DURATION_MS", "750"),
            ("STORY_START_FROM", "2"),
            ("FRAME_INTERVAL_MS", "33"),
        ]))
        .unwrap();

        assert_eq!(config.story.durations_ms, vec![750; 4]);
        assert_eq!(config.start_from, 2);
        assert_eq!(config.frame_interval, Duration::from_millis(33));
    }

    #[test]
    fn test_bad_duration_entry_is_a_config_error() {
        let result = CliConfig::from_lookup(lookup(&[("STORY_DURATIONS_MS", "1000,soon")]));

        assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("soon")));
    }

    #[test]
    fn test_zero_frame_interval_is_rejected() {
        let result = CliConfig::from_lookup(lookup(&[("FRAME_INTERVAL_MS", "0")]));

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_missing_story_file_is_an_io_error() {
        let result = CliConfig::from_lookup(lookup(&[(
            "STORY_FILE",
            "/nonexistent/storybar/story.json",
        )]));

        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
