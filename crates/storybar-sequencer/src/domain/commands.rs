//! Commands a host can issue to a sequencer.

use std::time::Duration;

use storybar_core::command::Command;

/// Host-issued playback command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackCommand {
    /// Replace the segment row with these durations.
    Configure(Vec<Duration>),
    /// Start (or restart) playback at a segment.
    StartFrom(usize),
    /// Finish the active segment early.
    Skip,
    /// Step back to the previous segment.
    Reverse,
    /// Freeze the active segment.
    Pause,
    /// Unfreeze the active segment.
    Resume,
    /// Park the active segment at 0% without notifying.
    Abandon,
    /// Tear everything down.
    Destroy,
}

impl Command for PlaybackCommand {
    fn command_type(&self) -> &'static str {
        match self {
            Self::Configure(_) => "playback.configure",
            Self::StartFrom(_) => "playback.start_from",
            Self::Skip => "playback.skip",
            Self::Reverse => "playback.reverse",
            Self::Pause => "playback.pause",
            Self::Resume => "playback.resume",
            Self::Abandon => "playback.abandon",
            Self::Destroy => "playback.destroy",
        }
    }
}
