//! Storybar Core — shared playback abstractions.
//!
//! This crate defines the capability traits the sequencer is wired to
//! (time source, host notifications, progress sink) and the error types
//! surfaced to callers. It contains no timing logic.

pub mod clock;
pub mod command;
pub mod error;
pub mod listener;
pub mod renderer;
