//! Shared test mocks and utilities for the Storybar story sequencer.

mod clock;
mod listener;
mod renderer;

pub use clock::ManualClock;
pub use listener::{ListenerCall, RecordingListener};
pub use renderer::{RecordingRenderer, RenderCall};
