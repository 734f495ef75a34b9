//! Context passed to platform operations

use rpmkit_events::{EventEmitter, EventSender};

/// Context for platform operations, providing event emission
#[derive(Clone, Default)]
pub struct PlatformContext {
    event_sender: Option<EventSender>,
    correlation_id: Option<String>,
}

impl PlatformContext {
    #[must_use]
    pub fn new(event_sender: Option<EventSender>) -> Self {
        Self {
            event_sender,
            correlation_id: None,
        }
    }

    /// Tag every event emitted through this context with a target name
    #[must_use]
    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }
}

impl EventEmitter for PlatformContext {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }

    fn emit(&self, event: rpmkit_events::AppEvent) {
        match self.correlation_id.as_deref() {
            Some(id) => self.emit_for(id, event),
            None => self.emit_message(rpmkit_events::EventMessage::new(event)),
        }
    }
}
