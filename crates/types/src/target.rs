//! Build targets and the OS version parameter they carry

use rpmkit_errors::TargetError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// Prefix of the parameterised build target, e.g. `build-centos7`.
pub const BUILD_TARGET_PREFIX: &str = "build-centos";

/// Major version of the distribution a package is built for.
///
/// Any positive integer written without leading zeros is accepted, so the
/// version always reads back as typed; whether a matching container profile
/// exists is only known once the compose tool runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OsVersion(NonZeroU32);

impl OsVersion {
    /// Create a version, returning `None` for zero
    #[must_use]
    pub const fn new(major: u32) -> Option<Self> {
        match NonZeroU32::new(major) {
            Some(major) => Some(Self(major)),
            None => None,
        }
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for OsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OsVersion {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TargetError::InvalidVersion {
            name: s.to_string(),
            value: s.to_string(),
        };
        // u32::from_str tolerates a leading '+', a make pattern stem would not
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        // `07` would name profile `centos7`, not the `centos07` asked for
        if s.len() > 1 && s.starts_with('0') {
            return Err(invalid());
        }
        s.parse::<NonZeroU32>().map(Self).map_err(|_| invalid())
    }
}

/// A named operation the orchestrator can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "target", content = "version", rename_all = "snake_case")]
pub enum Target {
    /// Clean the package repository, then build for the default version
    All,
    /// Containerized build for one OS version, artifact placed in the repository
    Build(OsVersion),
    /// Publish the repository, regenerate its indices and clean it
    Push,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Build(version) => write!(f, "{BUILD_TARGET_PREFIX}{version}"),
            Self::Push => write!(f, "push"),
        }
    }
}

impl FromStr for Target {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "push" => Ok(Self::Push),
            _ => {
                let Some(stem) = s.strip_prefix(BUILD_TARGET_PREFIX) else {
                    return Err(TargetError::Unknown {
                        name: s.to_string(),
                    });
                };
                stem.parse::<OsVersion>()
                    .map(Self::Build)
                    .map_err(|_| TargetError::InvalidVersion {
                        name: s.to_string(),
                        value: stem.to_string(),
                    })
            }
        }
    }
}
