//! Report type definitions for operations

use crate::{OsVersion, Target};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the artifact ended up in the repository tree
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementMethod {
    /// Destination shares the inode of the built file
    HardLink,
    /// Hard linking was refused; contents were copied
    Copy,
}

/// Build report
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BuildReport {
    /// Version that was built
    pub os_version: OsVersion,
    /// Compose profile that ran
    pub profile: String,
    /// Real file behind the artifact link
    pub artifact: PathBuf,
    /// Where the artifact was placed
    pub destination: PathBuf,
    pub method: PlacementMethod,
    /// Build duration
    pub duration_ms: u64,
}

/// One step run against the package repository
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RepositoryStepReport {
    pub step: String,
    pub duration_ms: u64,
}

/// Outcome of a single target
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TargetReport {
    pub target: Target,
    /// Repository steps in the order they ran
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub repository_steps: Vec<RepositoryStepReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildReport>,
    pub duration_ms: u64,
}
