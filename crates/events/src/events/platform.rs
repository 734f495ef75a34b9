//! Subprocess execution events

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use super::FailureContext;

/// What was run, for logs and failure reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessCommandDescriptor {
    pub program: String,
    pub args: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
}

impl fmt::Display for ProcessCommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum PlatformEvent {
    ProcessStarted {
        command: ProcessCommandDescriptor,
    },

    /// The process ran to completion, successfully or not
    ProcessCompleted {
        command: ProcessCommandDescriptor,
        /// `None` when the process was killed by a signal
        exit_code: Option<i32>,
        duration_ms: u64,
    },

    /// The process could not be started at all
    ProcessFailed {
        command: ProcessCommandDescriptor,
        failure: FailureContext,
        duration_ms: u64,
    },
}
