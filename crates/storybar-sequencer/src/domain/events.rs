//! Navigation events delivered to the host.

use serde::{Deserialize, Serialize};
use storybar_core::listener::StoriesListener;

/// Event type identifier for [`SequencerEvent::Next`].
pub const NEXT_EVENT_TYPE: &str = "story.next";

/// Event type identifier for [`SequencerEvent::Prev`].
pub const PREV_EVENT_TYPE: &str = "story.prev";

/// Event type identifier for [`SequencerEvent::Complete`].
pub const COMPLETE_EVENT_TYPE: &str = "story.complete";

/// One listener notification, as a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequencerEvent {
    /// A forward transition occurred.
    Next,
    /// A reverse transition occurred.
    Prev,
    /// The last segment finished.
    Complete,
}

impl SequencerEvent {
    /// Returns the event type name (used for logging and routing).
    #[must_use]
    pub fn event_type(self) -> &'static str {
        match self {
            Self::Next => NEXT_EVENT_TYPE,
            Self::Prev => PREV_EVENT_TYPE,
            Self::Complete => COMPLETE_EVENT_TYPE,
        }
    }

    /// Serializes the event to JSON.
    #[must_use]
    pub fn to_payload(self) -> serde_json::Value {
        serde_json::json!({ "type": self.event_type() })
    }

    /// Invokes the matching callback on `listener`.
    pub fn dispatch(self, listener: &mut dyn StoriesListener) {
        match self {
            Self::Next => listener.on_next(),
            Self::Prev => listener.on_prev(),
            Self::Complete => listener.on_complete(),
        }
    }
}
