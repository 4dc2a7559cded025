//! Sequencer domain model.

pub mod commands;
pub mod config;
pub mod driver;
pub mod events;
pub mod segment;
pub mod sequencer;
