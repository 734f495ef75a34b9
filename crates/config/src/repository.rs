//! Package repository configuration
//!
//! The repository is an external tree driven through its own make targets;
//! rpmkit only knows the target names and where built packages land.

use crate::constants;
use rpmkit_types::OsVersion;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Program plus leading arguments used to run the repository's targets
    #[serde(default = "default_make_command")]
    pub make_command: Vec<String>,
    #[serde(default = "default_rpms_subdir")]
    pub rpms_subdir: PathBuf,
    #[serde(default = "default_dest_prefix")]
    pub dest_prefix: String,
    #[serde(default = "default_arch")]
    pub arch: String,
    #[serde(default = "default_clean_target")]
    pub clean_target: String,
    #[serde(default = "default_publish_target")]
    pub publish_target: String,
    #[serde(default = "default_reindex_target")]
    pub reindex_target: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            make_command: default_make_command(),
            rpms_subdir: default_rpms_subdir(),
            dest_prefix: default_dest_prefix(),
            arch: default_arch(),
            clean_target: default_clean_target(),
            publish_target: default_publish_target(),
            reindex_target: default_reindex_target(),
        }
    }
}

impl RepositoryConfig {
    /// Directory name holding packages for one version, e.g. `CentOS7-x86_64`
    #[must_use]
    pub fn version_dir_name(&self, version: OsVersion) -> String {
        format!("{}{version}-{}", self.dest_prefix, self.arch)
    }

    /// Full destination directory for a version under `repository_dir`
    #[must_use]
    pub fn destination_dir(&self, repository_dir: &Path, version: OsVersion) -> PathBuf {
        repository_dir
            .join(&self.rpms_subdir)
            .join(self.version_dir_name(version))
    }

    /// Targets run by `push`, in order
    #[must_use]
    pub fn push_steps(&self) -> [&str; 3] {
        [
            self.publish_target.as_str(),
            self.reindex_target.as_str(),
            self.clean_target.as_str(),
        ]
    }
}

fn default_make_command() -> Vec<String> {
    vec![constants::DEFAULT_MAKE_PROGRAM.to_string()]
}
fn default_rpms_subdir() -> PathBuf {
    PathBuf::from(constants::DEFAULT_RPMS_SUBDIR)
}
fn default_dest_prefix() -> String {
    constants::DEFAULT_DEST_PREFIX.to_string()
}
fn default_arch() -> String {
    constants::DEFAULT_ARCH.to_string()
}
fn default_clean_target() -> String {
    constants::DEFAULT_CLEAN_TARGET.to_string()
}
fn default_publish_target() -> String {
    constants::DEFAULT_PUBLISH_TARGET.to_string()
}
fn default_reindex_target() -> String {
    constants::DEFAULT_REINDEX_TARGET.to_string()
}
