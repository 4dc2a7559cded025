//! Application-level entry points over the sequencer domain.

pub mod command_handlers;
pub mod query_handlers;
