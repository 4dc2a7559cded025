//! Host notification protocol.

/// Receives navigation notifications from a sequencer.
///
/// Callbacks are delivered synchronously on whatever context drove the
/// transition, after the sequencer has settled on its new cursor.
pub trait StoriesListener: Send {
    /// A forward transition occurred.
    fn on_next(&mut self);

    /// A reverse transition to the previous segment occurred.
    fn on_prev(&mut self);

    /// The last segment finished; the sequence is now terminal.
    fn on_complete(&mut self);
}
