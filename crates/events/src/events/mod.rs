use serde::{Deserialize, Serialize};

use crate::{EventLevel, EventSource};
use rpmkit_errors::UserFacingError;

/// Structured failure information shared across domains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Short user-facing message.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub retryable: bool,
}

impl FailureContext {
    /// Build failure context from a `UserFacingError` implementation.
    #[must_use]
    pub fn from_error<E: UserFacingError + ?Sized>(error: &E) -> Self {
        Self {
            code: error.user_code().map(Into::into),
            message: error.user_message().into_owned(),
            hint: error.user_hint().map(Into::into),
            retryable: error.is_retryable(),
        }
    }
}

pub mod artifact;
pub mod platform;
pub mod step;

pub use artifact::*;
pub use platform::*;
pub use step::*;

/// Top-level application event enum that aggregates all domain-specific events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// Target and step lifecycle of the orchestrator
    Step(StepEvent),

    /// Artifact resolution and placement in the repository tree
    Artifact(ArtifactEvent),

    /// Subprocess execution
    Platform(PlatformEvent),
}

impl AppEvent {
    /// Severity used when the event is logged
    #[must_use]
    pub fn level(&self) -> EventLevel {
        match self {
            AppEvent::Artifact(ArtifactEvent::LinkFallback { .. }) => EventLevel::Warn,
            AppEvent::Artifact(ArtifactEvent::Resolved { .. })
            | AppEvent::Platform(_) => EventLevel::Debug,
            AppEvent::Step(StepEvent::TargetFailed { .. } | StepEvent::StepFailed { .. }) => {
                EventLevel::Error
            }
            AppEvent::Step(_) | AppEvent::Artifact(_) => EventLevel::Info,
        }
    }

    #[must_use]
    pub fn source(&self) -> EventSource {
        match self {
            AppEvent::Step(_) => EventSource::STEP,
            AppEvent::Artifact(_) => EventSource::ARTIFACT,
            AppEvent::Platform(_) => EventSource::PLATFORM,
        }
    }
}
