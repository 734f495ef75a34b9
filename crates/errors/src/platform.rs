//! Platform-specific operation errors

use std::borrow::Cow;

use crate::{UserFacingError, EXIT_COMMAND_NOT_FOUND, EXIT_FAILURE};
use thiserror::Error;

/// Errors that can occur while spawning processes or touching the filesystem
#[derive(Debug, Clone, Error)]
pub enum PlatformError {
    #[error("filesystem operation failed: {operation} - {message}")]
    FilesystemOperationFailed { operation: String, message: String },

    #[error("process execution failed: {command} - {message}")]
    ProcessExecutionFailed { command: String, message: String },

    #[error("command not found: {command}")]
    CommandNotFound { command: String },

    #[error("permission denied: {operation} - {message}")]
    PermissionDenied { operation: String, message: String },
}

impl PlatformError {
    /// Exit status matching what a shell reports for the same failure
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CommandNotFound { .. } => EXIT_COMMAND_NOT_FOUND,
            _ => EXIT_FAILURE,
        }
    }
}

impl UserFacingError for PlatformError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::CommandNotFound { .. } => Some(
                "Install the missing tool or point build.compose_command / repository.make_command at it.",
            ),
            Self::PermissionDenied { .. } => Some("Check permissions on the program and its working directory."),
            _ => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::FilesystemOperationFailed { .. } => "platform.filesystem_operation_failed",
            Self::ProcessExecutionFailed { .. } => "platform.process_execution_failed",
            Self::CommandNotFound { .. } => "platform.command_not_found",
            Self::PermissionDenied { .. } => "platform.permission_denied",
        };
        Some(code)
    }
}
