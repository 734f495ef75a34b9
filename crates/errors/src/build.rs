//! Build error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum BuildError {
    #[error("containerized build for profile {profile} failed{}", exit_suffix(.code))]
    ComposeFailed { profile: String, code: Option<i32> },

    #[error("build artifact not found: {path}")]
    ArtifactMissing { path: String },

    #[error("build artifact is not a regular file: {path}")]
    ArtifactNotAFile { path: String },

    #[error("failed to place artifact {source_path} into {destination}: {message}")]
    PlacementFailed {
        source_path: String,
        destination: String,
        message: String,
    },

    #[error("invalid path: {path} - {reason}")]
    InvalidPath { path: String, reason: String },
}

#[allow(clippy::ref_option)]
pub(crate) fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" with exit code {code}"),
        None => " (terminated by signal)".to_string(),
    }
}

impl UserFacingError for BuildError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::ComposeFailed { .. } => Some(
                "Inspect the container output above; the compose file must define the requested profile.",
            ),
            Self::ArtifactMissing { .. } | Self::ArtifactNotAFile { .. } => Some(
                "The build must leave the package (or a link to it) at the configured artifact path.",
            ),
            Self::PlacementFailed { .. } => {
                Some("Ensure the repository directory is writable and has free space.")
            }
            Self::InvalidPath { .. } => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::ComposeFailed { .. } => "build.compose_failed",
            Self::ArtifactMissing { .. } => "build.artifact_missing",
            Self::ArtifactNotAFile { .. } => "build.artifact_not_a_file",
            Self::PlacementFailed { .. } => "build.placement_failed",
            Self::InvalidPath { .. } => "build.invalid_path",
        };
        Some(code)
    }
}
