//! Lifecycle of targets and the steps they are made of

use serde::{Deserialize, Serialize};
use std::fmt;

use super::FailureContext;
use rpmkit_types::Target;

/// One unit of work inside a target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    /// `docker-compose run --rm <profile>`
    Compose { profile: String },
    /// Creating the versioned directory in the repository
    PrepareDestination,
    /// Linking or copying the artifact into place
    PlaceArtifact,
    /// A make target run inside the package repository
    Repository { target: String },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compose { profile } => write!(f, "compose:{profile}"),
            Self::PrepareDestination => write!(f, "prepare-destination"),
            Self::PlaceArtifact => write!(f, "place-artifact"),
            Self::Repository { target } => write!(f, "repository:{target}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepEvent {
    TargetStarted {
        target: Target,
    },

    TargetCompleted {
        target: Target,
        duration_ms: u64,
    },

    TargetFailed {
        target: Target,
        failure: FailureContext,
    },

    StepStarted {
        target: Target,
        step: Step,
        /// Rendered command line, when the step runs a subprocess
        #[serde(skip_serializing_if = "Option::is_none")]
        command: Option<String>,
    },

    StepCompleted {
        target: Target,
        step: Step,
        duration_ms: u64,
    },

    StepFailed {
        target: Target,
        step: Step,
        failure: FailureContext,
        duration_ms: u64,
    },
}
