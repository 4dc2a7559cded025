//! Storybar terminal host entry point.

use std::error::Error;

use storybar_runtime::{PlayerConfig, PlayerHandle, StoryPlayer};
use storybar_sequencer::domain::events::SequencerEvent;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod keys;
mod terminal;

use config::CliConfig;
use error::AppError;
use keys::Key;
use terminal::TerminalRenderer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Logs go to stderr; stdout carries the progress row.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    tracing::info!("Starting Storybar");

    let config = CliConfig::from_env()?;
    run(config).await?;

    Ok(())
}

async fn run(config: CliConfig) -> Result<(), AppError> {
    let count = config.story.durations_ms.len();
    let renderer = TerminalRenderer::new(std::io::stdout(), count);
    let (handle, mut events) = StoryPlayer::spawn(
        Box::new(renderer),
        PlayerConfig {
            frame_interval: config.frame_interval,
        },
    );

    handle.configure(config.story.durations()).await?;
    handle.start_from(config.start_from)?;
    tracing::info!(
        segments = count,
        start_from = config.start_from,
        "playing story row (s=skip r=reverse p=pause c=resume a=abandon g=go q=quit)"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut input_open = true;

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(event) => {
                    tracing::info!(event = event.event_type(), payload = %event.to_payload(), "story event");
                    if event == SequencerEvent::Complete {
                        break;
                    }
                }
                None => break,
            },
            line = lines.next_line(), if input_open => match line? {
                Some(line) => match Key::parse(&line) {
                    Some(Key::Quit) => break,
                    Some(key) => apply(&handle, key).await?,
                    None => tracing::warn!(input = line.trim(), "unknown key"),
                },
                None => input_open = false,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    handle.destroy()?;
    println!();
    tracing::info!("Storybar stopped");

    Ok(())
}

async fn apply(handle: &PlayerHandle, key: Key) -> Result<(), AppError> {
    match key {
        Key::Skip => handle.skip()?,
        Key::Reverse => handle.reverse()?,
        Key::Pause => handle.pause()?,
        Key::Resume => handle.resume()?,
        Key::Abandon => handle.abandon()?,
        Key::Restart => {
            let cursor = handle.snapshot().await?.current.unwrap_or(0);
            handle.start_from(cursor)?;
        }
        Key::Quit => {}
    }
    Ok(())
}
