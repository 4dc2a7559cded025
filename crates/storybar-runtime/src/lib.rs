//! Storybar runtime — plays a story sequence on a tokio task.
//!
//! The sequencer itself is synchronous and never reads time on its own.
//! This crate supplies the missing pieces: a clock tied to tokio's timer,
//! a task that sleeps until the active segment's deadline and delivers the
//! timer callback, a frame ticker for the renderer, and a cloneable handle
//! through which hosts issue commands.

pub mod clock;
pub mod error;
pub mod listener;
pub mod player;

pub use error::PlayerError;
pub use player::{PlayerConfig, PlayerHandle, StoryPlayer};
