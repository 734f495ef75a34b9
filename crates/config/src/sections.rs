//! Configuration sections for the CLI and the containerized build

use crate::constants;
use rpmkit_types::{ColorChoice, OsVersion};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// General application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default)]
    pub color: ColorChoice,
}

/// Path configuration
///
/// Relative paths are resolved against `base_dir`, which defaults to the
/// working directory the orchestrator is started from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathConfig {
    #[serde(default)]
    pub base_dir: Option<PathBuf>,
    #[serde(default = "default_dist_dir")]
    pub dist_dir: PathBuf,
    #[serde(default = "default_repository_dir")]
    pub repository_dir: PathBuf,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            dist_dir: default_dist_dir(),
            repository_dir: default_repository_dir(),
        }
    }
}

/// Containerized build configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Program plus leading arguments used to reach docker-compose
    #[serde(default = "default_compose_command")]
    pub compose_command: Vec<String>,
    /// Passed as `-f <file>` when set
    #[serde(default)]
    pub compose_file: Option<PathBuf>,
    /// Service name is `<profile_prefix><version>`
    #[serde(default = "default_profile_prefix")]
    pub profile_prefix: String,
    /// File the build leaves in the dist directory
    #[serde(default = "default_artifact_name")]
    pub artifact_name: String,
    /// Version built by the `all` target
    #[serde(default = "default_os_version")]
    pub default_os_version: OsVersion,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            compose_command: default_compose_command(),
            compose_file: None,
            profile_prefix: default_profile_prefix(),
            artifact_name: default_artifact_name(),
            default_os_version: default_os_version(),
        }
    }
}

impl BuildConfig {
    /// Compose service name for a version, e.g. `centos7`
    #[must_use]
    pub fn profile(&self, version: OsVersion) -> String {
        format!("{}{version}", self.profile_prefix)
    }
}

// Default value functions for serde
fn default_dist_dir() -> PathBuf {
    PathBuf::from(constants::DEFAULT_DIST_DIR)
}

fn default_repository_dir() -> PathBuf {
    PathBuf::from(constants::DEFAULT_REPOSITORY_DIR)
}

fn default_compose_command() -> Vec<String> {
    vec![constants::DEFAULT_COMPOSE_PROGRAM.to_string()]
}

fn default_profile_prefix() -> String {
    constants::DEFAULT_PROFILE_PREFIX.to_string()
}

fn default_artifact_name() -> String {
    constants::DEFAULT_ARTIFACT_NAME.to_string()
}

fn default_os_version() -> OsVersion {
    constants::DEFAULT_OS_VERSION
}
