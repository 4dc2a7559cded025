//! Listener that forwards notifications onto a channel.

use storybar_core::listener::StoriesListener;
use storybar_sequencer::domain::events::SequencerEvent;
use tokio::sync::mpsc;
use tracing::trace;

/// Turns listener callbacks into [`SequencerEvent`] messages.
///
/// Sends never block; if the receiving side has gone away the event is
/// dropped.
#[derive(Debug, Clone)]
pub struct ChannelListener {
    tx: mpsc::UnboundedSender<SequencerEvent>,
}

impl ChannelListener {
    /// Creates a listener publishing to `tx`.
    #[must_use]
    pub fn new(tx: mpsc::UnboundedSender<SequencerEvent>) -> Self {
        Self { tx }
    }

    fn publish(&self, event: SequencerEvent) {
        if self.tx.send(event).is_err() {
            trace!(event = event.event_type(), "event receiver dropped");
        }
    }
}

impl StoriesListener for ChannelListener {
    fn on_next(&mut self) {
        self.publish(SequencerEvent::Next);
    }

    fn on_prev(&mut self) {
        self.publish(SequencerEvent::Prev);
    }

    fn on_complete(&mut self) {
        self.publish(SequencerEvent::Complete);
    }
}
