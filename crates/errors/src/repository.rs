//! Package repository error types

use std::borrow::Cow;

use crate::build::exit_suffix;
use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum RepositoryError {
    #[error("repository step `{step}` failed{}", exit_suffix(.code))]
    StepFailed { step: String, code: Option<i32> },

    #[error("repository directory not found: {path}")]
    NotFound { path: String },
}

impl UserFacingError for RepositoryError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::StepFailed { .. } => {
                Some("Run the failing make target inside the repository to see its full output.")
            }
            Self::NotFound { .. } => {
                Some("Check out the package repository next to the project or set RPMKIT_REPOSITORY_DIR.")
            }
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::StepFailed { .. } => "repository.step_failed",
            Self::NotFound { .. } => "repository.not_found",
        };
        Some(code)
    }
}
