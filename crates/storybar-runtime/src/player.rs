//! The player task and its handle.

use std::sync::Arc;
use std::time::{Duration, Instant};

use storybar_core::command::Command;
use storybar_core::error::ConfigError;
use storybar_core::renderer::ProgressRenderer;
use storybar_sequencer::application::command_handlers::handle_command;
use storybar_sequencer::application::query_handlers::{SequencerSnapshot, snapshot};
use storybar_sequencer::domain::commands::PlaybackCommand;
use storybar_sequencer::domain::driver::TimerToken;
use storybar_sequencer::domain::events::SequencerEvent;
use storybar_sequencer::domain::sequencer::StorySequencer;
use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::clock::TokioClock;
use crate::error::PlayerError;
use crate::listener::ChannelListener;

/// Default cadence at which fill levels are pushed to the renderer.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Player tuning.
#[derive(Debug, Clone, Copy)]
pub struct PlayerConfig {
    /// How often the active segment's progress is rendered.
    pub frame_interval: Duration,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            frame_interval: DEFAULT_FRAME_INTERVAL,
        }
    }
}

enum Request {
    Command {
        command: PlaybackCommand,
        reply: Option<oneshot::Sender<Result<(), ConfigError>>>,
    },
    Snapshot(oneshot::Sender<SequencerSnapshot>),
}

impl std::fmt::Debug for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Command { command, .. } => f.debug_tuple("Command").field(command).finish(),
            Self::Snapshot(_) => f.write_str("Snapshot"),
        }
    }
}

/// Handle to a running player. Cheap to clone; the player stops once every
/// handle is dropped.
#[derive(Debug, Clone)]
pub struct PlayerHandle {
    requests: mpsc::UnboundedSender<Request>,
}

impl PlayerHandle {
    /// Replaces the segment row.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::Config` if the row is rejected and
    /// `PlayerError::Closed` if the player has stopped.
    pub async fn configure(&self, durations: Vec<Duration>) -> Result<(), PlayerError> {
        let (reply, rx) = oneshot::channel();
        self.send(Request::Command {
            command: PlaybackCommand::Configure(durations),
            reply: Some(reply),
        })?;
        rx.await.map_err(|_| PlayerError::Closed)??;
        Ok(())
    }

    /// Starts at the first segment.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::Closed` if the player has stopped.
    pub fn start(&self) -> Result<(), PlayerError> {
        self.start_from(0)
    }

    /// Starts at segment `index`.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::Closed` if the player has stopped.
    pub fn start_from(&self, index: usize) -> Result<(), PlayerError> {
        self.command(PlaybackCommand::StartFrom(index))
    }

    /// Finishes the active segment early.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::Closed` if the player has stopped.
    pub fn skip(&self) -> Result<(), PlayerError> {
        self.command(PlaybackCommand::Skip)
    }

    /// Steps back to the previous segment.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::Closed` if the player has stopped.
    pub fn reverse(&self) -> Result<(), PlayerError> {
        self.command(PlaybackCommand::Reverse)
    }

    /// Freezes the active segment.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::Closed` if the player has stopped.
    pub fn pause(&self) -> Result<(), PlayerError> {
        self.command(PlaybackCommand::Pause)
    }

    /// Unfreezes the active segment.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::Closed` if the player has stopped.
    pub fn resume(&self) -> Result<(), PlayerError> {
        self.command(PlaybackCommand::Resume)
    }

    /// Parks the active segment at 0% without notifying.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::Closed` if the player has stopped.
    pub fn abandon(&self) -> Result<(), PlayerError> {
        self.command(PlaybackCommand::Abandon)
    }

    /// Tears the sequence down. The task keeps running so `configure` can
    /// bring it back.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::Closed` if the player has stopped.
    pub fn destroy(&self) -> Result<(), PlayerError> {
        self.command(PlaybackCommand::Destroy)
    }

    /// Captures the sequencer's current state.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::Closed` if the player has stopped.
    pub async fn snapshot(&self) -> Result<SequencerSnapshot, PlayerError> {
        let (reply, rx) = oneshot::channel();
        self.send(Request::Snapshot(reply))?;
        rx.await.map_err(|_| PlayerError::Closed)
    }

    fn command(&self, command: PlaybackCommand) -> Result<(), PlayerError> {
        self.send(Request::Command {
            command,
            reply: None,
        })
    }

    fn send(&self, request: Request) -> Result<(), PlayerError> {
        self.requests.send(request).map_err(|_| PlayerError::Closed)
    }
}

/// Runs a [`StorySequencer`] on a tokio task.
///
/// The task is the sequencer's single logical thread: commands, timer
/// callbacks, and frame ticks are handled one at a time, in the order the
/// task observes them.
#[derive(Debug)]
pub struct StoryPlayer {
    sequencer: StorySequencer,
    requests: mpsc::UnboundedReceiver<Request>,
    listener: ChannelListener,
    config: PlayerConfig,
}

impl StoryPlayer {
    /// Spawns a player rendering to `renderer`.
    ///
    /// Returns the command handle and the stream of navigation events.
    /// Must be called from within a tokio runtime.
    pub fn spawn(
        renderer: Box<dyn ProgressRenderer>,
        config: PlayerConfig,
    ) -> (PlayerHandle, mpsc::UnboundedReceiver<SequencerEvent>) {
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let listener = ChannelListener::new(event_tx);
        let mut sequencer = StorySequencer::with_renderer(Arc::new(TokioClock), renderer);
        sequencer.set_listener(listener.clone());

        let player = Self {
            sequencer,
            requests: request_rx,
            listener,
            config,
        };
        tokio::spawn(player.run());

        (
            PlayerHandle {
                requests: request_tx,
            },
            event_rx,
        )
    }

    async fn run(mut self) {
        info!(frame_interval = ?self.config.frame_interval, "story player started");

        // A zero period would make the interval panic.
        let period = self.config.frame_interval.max(Duration::from_millis(1));
        let mut frames = tokio::time::interval(period);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            let deadline = self.sequencer.next_deadline();
            tokio::select! {
                biased;

                request = self.requests.recv() => match request {
                    Some(request) => self.handle(request),
                    None => break,
                },
                token = wait_for(deadline) => self.sequencer.fire(token),
                _ = frames.tick() => self.sequencer.render_frame(),
            }
        }

        self.sequencer.destroy();
        info!("story player stopped");
    }

    fn handle(&mut self, request: Request) {
        match request {
            Request::Command { command, reply } => {
                let result = handle_command(&mut self.sequencer, &command);
                if let Err(err) = &result {
                    warn!(command = command.command_type(), error = %err, "command rejected");
                } else if matches!(command, PlaybackCommand::Configure(_)) {
                    // Destroy detaches the listener; a fresh row gets it back.
                    self.sequencer.set_listener(self.listener.clone());
                }
                if let Some(reply) = reply {
                    let _ = reply.send(result);
                }
            }
            Request::Snapshot(reply) => {
                let _ = reply.send(snapshot(&self.sequencer));
            }
        }
    }
}

async fn wait_for(deadline: Option<(Instant, TimerToken)>) -> TimerToken {
    match deadline {
        Some((at, token)) => {
            tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await;
            debug!(?token, "segment timer due");
            token
        }
        None => std::future::pending().await,
    }
}
