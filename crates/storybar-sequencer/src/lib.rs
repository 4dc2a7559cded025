//! Storybar — story sequencer.
//!
//! Owns an ordered row of timed segments, plays exactly one at a time, and
//! tells the host when playback moves forward, moves back, or completes.

pub mod application;
pub mod domain;
