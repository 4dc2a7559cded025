//! Player error types.

use storybar_core::error::ConfigError;
use thiserror::Error;

/// Errors returned through a [`crate::PlayerHandle`].
#[derive(Debug, Error)]
pub enum PlayerError {
    /// The player task is gone.
    #[error("story player has stopped")]
    Closed,

    /// The requested configuration was rejected.
    #[error("invalid story configuration: {0}")]
    Config(#[from] ConfigError),
}
