#![warn(mismatched_lifetime_syntaxes)]
#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Error types for the rpmkit build orchestrator
//!
//! This crate provides fine-grained error types organized by domain.
//! All error types implement Clone where possible for easier handling.

use std::borrow::Cow;

use thiserror::Error;

pub mod build;
pub mod config;
pub mod platform;
pub mod repository;
pub mod storage;
pub mod target;

// Re-export all error types at the root
pub use build::BuildError;
pub use config::ConfigError;
pub use platform::PlatformError;
pub use repository::RepositoryError;
pub use storage::StorageError;
pub use target::TargetError;

/// Exit status used when a failure did not come from a subprocess.
pub const EXIT_FAILURE: i32 = 1;

/// Exit status used when a program could not be found, matching POSIX shells.
pub const EXIT_COMMAND_NOT_FOUND: i32 = 127;

/// Generic error type for cross-crate boundaries
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("build error: {0}")]
    Build(#[from] BuildError),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("target error: {0}")]
    Target(#[from] TargetError),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("I/O error: {message}")]
    Io {
        kind: std::io::ErrorKind,
        message: String,
    },
}

impl Error {
    /// Create an internal error with a message
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Process exit status the CLI should terminate with for this error.
    ///
    /// A subprocess that exited non-zero hands its own status through, so
    /// callers observe the same code they would have seen running the step
    /// by hand.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Platform(err) => err.exit_code(),
            Error::Build(BuildError::ComposeFailed { code, .. })
            | Error::Repository(RepositoryError::StepFailed { code, .. }) => {
                code.filter(|c| *c != 0).unwrap_or(EXIT_FAILURE)
            }
            _ => EXIT_FAILURE,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON error: {err}"))
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(ConfigError::ParseError {
            message: err.to_string(),
        })
    }
}

/// Result type alias for rpmkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Minimal interface for rendering user-facing error information without
/// requiring heavyweight envelopes.
pub trait UserFacingError {
    /// Short message suitable for CLI output.
    fn user_message(&self) -> Cow<'_, str>;

    /// Optional remediation hint.
    fn user_hint(&self) -> Option<&'static str> {
        None
    }

    /// Whether retrying the same operation is likely to succeed.
    fn is_retryable(&self) -> bool {
        false
    }

    /// Stable error code for analytics / structured reporting.
    fn user_code(&self) -> Option<&'static str> {
        None
    }
}

impl UserFacingError for Error {
    fn user_message(&self) -> Cow<'_, str> {
        match self {
            Error::Build(err) => err.user_message(),
            Error::Repository(err) => err.user_message(),
            Error::Io { message, .. } => Cow::Owned(message.clone()),
            _ => Cow::Owned(self.to_string()),
        }
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Error::Build(err) => err.user_hint(),
            Error::Repository(err) => err.user_hint(),
            Error::Config(err) => err.user_hint(),
            Error::Storage(err) => err.user_hint(),
            Error::Platform(err) => err.user_hint(),
            Error::Target(err) => err.user_hint(),
            _ => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Error::Storage(err) => err.user_code(),
            Error::Config(err) => err.user_code(),
            Error::Build(err) => err.user_code(),
            Error::Repository(err) => err.user_code(),
            Error::Platform(err) => err.user_code(),
            Error::Target(err) => err.user_code(),
            Error::Internal(_) => Some("error.internal"),
            Error::Io { .. } => Some("error.io"),
        }
    }
}
