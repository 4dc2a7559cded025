//! Storybar CLI — error types.

use storybar_runtime::PlayerError;
use thiserror::Error;

/// Startup and runtime errors for the terminal host.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The story player rejected a request or has stopped.
    #[error("player error: {0}")]
    Player(#[from] PlayerError),

    /// Reading the story file or the terminal failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The story file is not valid JSON.
    #[error("story file error: {0}")]
    Json(#[from] serde_json::Error),
}
