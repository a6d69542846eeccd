//! Application event bus
//!
//! Components publish here instead of calling into each other, so the
//! direction of every notification is declared by who subscribes.

use crate::apply::ApplyStep;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::trace;

/// Default number of events buffered per subscriber
pub const DEFAULT_CAPACITY: usize = 64;

/// Something other components may want to react to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    /// The persisted profile set was replaced; carries the new names in order
    ProfilesChanged { names: Vec<String> },
    /// A profile was applied successfully
    ProfileApplied { name: String },
    /// Applying a profile stopped at `step`
    ProfileApplyFailed {
        name: String,
        step: Option<ApplyStep>,
        message: String,
    },
    /// A tool was constructed on first use
    ToolInstantiated { name: String },
}

#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<AppEvent>,
}

impl EventBus {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }

    /// Publish an event, returning how many subscribers received it
    ///
    /// Having no subscribers is not an error.
    pub fn publish(&self, event: AppEvent) -> usize {
        trace!(?event, "Publishing event");
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
