//! Command handlers for the story sequencer.
//!
//! Translates host-issued [`PlaybackCommand`] values into sequencer calls so
//! that queued hosts (the async player, the CLI) share one dispatch path.

use storybar_core::command::Command;
use storybar_core::error::ConfigError;
use tracing::debug;

use crate::domain::commands::PlaybackCommand;
use crate::domain::sequencer::StorySequencer;

/// Applies `command` to `sequencer`.
///
/// # Errors
///
/// Returns `ConfigError` if a `Configure` command carries an invalid row.
/// Every other command either takes effect or is silently ignored.
pub fn handle_command(
    sequencer: &mut StorySequencer,
    command: &PlaybackCommand,
) -> Result<(), ConfigError> {
    debug!(command = command.command_type(), "handling playback command");
    match command {
        PlaybackCommand::Configure(durations) => sequencer.configure(durations)?,
        PlaybackCommand::StartFrom(index) => sequencer.start_from(*index),
        PlaybackCommand::Skip => sequencer.skip(),
        PlaybackCommand::Reverse => sequencer.reverse(),
        PlaybackCommand::Pause => sequencer.pause(),
        PlaybackCommand::Resume => sequencer.resume(),
        PlaybackCommand::Abandon => sequencer.abandon(),
        PlaybackCommand::Destroy => sequencer.destroy(),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use storybar_core::error::ConfigError;
    use storybar_test_support::{ListenerCall, ManualClock, RecordingListener};

    use crate::application::command_handlers::handle_command;
    use crate::domain::commands::PlaybackCommand;
    use crate::domain::sequencer::{PlaybackStatus, StorySequencer};

    fn sequencer() -> StorySequencer {
        StorySequencer::new(Arc::new(ManualClock::new()))
    }

    #[test]
    fn test_handle_configure_then_start_plays_first_segment() {
        // Arrange
        let mut sequencer = sequencer();
        let durations = vec![Duration::from_millis(100), Duration::from_millis(200)];

        // Act
        handle_command(&mut sequencer, &PlaybackCommand::Configure(durations)).unwrap();
        handle_command(&mut sequencer, &PlaybackCommand::StartFrom(0)).unwrap();

        // Assert
        assert_eq!(sequencer.status(), PlaybackStatus::Playing);
        assert_eq!(sequencer.current(), Some(0));
    }

    #[test]
    fn test_handle_configure_surfaces_config_error() {
        let mut sequencer = sequencer();

        let result = handle_command(&mut sequencer, &PlaybackCommand::Configure(Vec::new()));

        assert_eq!(result, Err(ConfigError::EmptySequence));
        assert_eq!(sequencer.status(), PlaybackStatus::Unconfigured);
    }

    #[test]
    fn test_handle_skip_advances_and_notifies() {
        // Arrange
        let mut sequencer = sequencer();
        let listener = RecordingListener::new();
        sequencer.set_listener(listener.clone());
        sequencer.configure_uniform(3, Duration::from_secs(1)).unwrap();
        sequencer.start();

        // Act
        handle_command(&mut sequencer, &PlaybackCommand::Skip).unwrap();

        // Assert
        assert_eq!(sequencer.current(), Some(1));
        assert_eq!(listener.calls(), vec![ListenerCall::Next]);
    }

    #[test]
    fn test_handle_commands_on_unconfigured_sequencer_are_ignored() {
        let mut sequencer = sequencer();

        for command in [
            PlaybackCommand::Skip,
            PlaybackCommand::Reverse,
            PlaybackCommand::Pause,
            PlaybackCommand::Resume,
            PlaybackCommand::Abandon,
            PlaybackCommand::StartFrom(0),
        ] {
            assert!(handle_command(&mut sequencer, &command).is_ok());
        }
        assert_eq!(sequencer.status(), PlaybackStatus::Unconfigured);
    }
}
