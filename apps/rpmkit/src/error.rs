//! CLI error handling

use std::fmt;

use rpmkit_errors::{UserFacingError, EXIT_FAILURE};
use rpmkit_events::FailureContext;

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Configuration or orchestration error
    Ops(rpmkit_errors::Error),
    /// Writing output failed
    Io(std::io::Error),
}

impl CliError {
    /// Status the process exits with
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Ops(e) => e.exit_code(),
            CliError::Io(_) => EXIT_FAILURE,
        }
    }

    /// Structured form used for `--json` output
    pub fn failure(&self) -> FailureContext {
        match self {
            CliError::Ops(e) => FailureContext::from_error(e),
            CliError::Io(e) => FailureContext {
                code: Some("error.io".to_string()),
                message: e.to_string(),
                hint: None,
                retryable: false,
            },
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Ops(e) => {
                let message = e.user_message();
                write!(f, "{message}")?;
                if let Some(code) = e.user_code() {
                    write!(f, "\n  Code: {code}")?;
                }
                if let Some(hint) = e.user_hint() {
                    write!(f, "\n  Hint: {hint}")?;
                }
                Ok(())
            }
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Ops(e) => Some(e),
            CliError::Io(e) => Some(e),
        }
    }
}

impl From<rpmkit_errors::Error> for CliError {
    fn from(e: rpmkit_errors::Error) -> Self {
        CliError::Ops(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}
