#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Event system for async communication in rpmkit
//!
//! Library crates never print. Everything the orchestrator wants the user to
//! see travels as an [`AppEvent`] over an unbounded channel; the CLI drains
//! the channel and turns events into tracing records.

pub mod meta;
pub use meta::{EventLevel, EventMeta, EventSource};

pub mod events;
pub use events::{
    AppEvent, ArtifactEvent, FailureContext, PlatformEvent,
    ProcessCommandDescriptor, Step, StepEvent,
};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// An event together with the metadata stamped at emission time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub meta: EventMeta,
    pub event: AppEvent,
}

impl EventMessage {
    #[must_use]
    pub fn new(event: AppEvent) -> Self {
        let meta = EventMeta::new(event.level(), event.source());
        Self { meta, event }
    }

    #[must_use]
    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.meta = self.meta.with_correlation_id(correlation_id);
        self
    }
}

pub type EventSender = UnboundedSender<EventMessage>;

pub type EventReceiver = UnboundedReceiver<EventMessage>;

/// Create a new event channel
#[must_use]
pub fn channel() -> (EventSender, EventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// The unified trait for emitting events throughout rpmkit
///
/// Implemented by anything that may hold an `EventSender`; emitting is a
/// no-op when there is no sender or nobody listens.
pub trait EventEmitter {
    fn event_sender(&self) -> Option<&EventSender>;

    /// Emit an event through this emitter
    fn emit(&self, event: AppEvent) {
        self.emit_message(EventMessage::new(event));
    }

    /// Emit an event tagged with the target it belongs to
    fn emit_for(&self, correlation_id: &str, event: AppEvent) {
        self.emit_message(EventMessage::new(event).with_correlation_id(correlation_id));
    }

    fn emit_message(&self, message: EventMessage) {
        if let Some(sender) = self.event_sender() {
            // Ignore send errors - if receiver is dropped, we just continue
            let _ = sender.send(message);
        }
    }
}

impl EventEmitter for EventSender {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(self)
    }
}
