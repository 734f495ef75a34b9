//! Target name parsing errors

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TargetError {
    #[error("unknown target: {name}")]
    Unknown { name: String },

    #[error("invalid OS version in target {name}: {value}")]
    InvalidVersion { name: String, value: String },
}

impl UserFacingError for TargetError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        Some("Valid targets are `all`, `push` and `build-centos<N>` (for example `build-centos7`).")
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::Unknown { .. } => "target.unknown",
            Self::InvalidVersion { .. } => "target.invalid_version",
        };
        Some(code)
    }
}
