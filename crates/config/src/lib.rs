#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for rpmkit
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (`./rpmkit.toml` or `~/.config/rpmkit/config.toml`)
//! - Environment variables
//! - CLI flags

pub mod constants;
pub mod sections;
pub mod repository;

pub use sections::{BuildConfig, GeneralConfig, PathConfig};
pub use repository::RepositoryConfig;

use rpmkit_errors::{ConfigError, Error, StorageError};
use rpmkit_types::{ColorChoice, OsVersion};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub paths: PathConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub repository: RepositoryConfig,
}

/// Absolute paths the orchestrator works with, resolved once per invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// Working directory for the compose tool
    pub base_dir: PathBuf,
    /// Where the build leaves its artifact
    pub dist_dir: PathBuf,
    /// Package repository root
    pub repository_dir: PathBuf,
}

impl Config {
    /// Get the user-level config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir
            .join(constants::CONFIG_DIR_NAME)
            .join(constants::CONFIG_FILE_NAME))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML,
    /// or fails validation.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|e| -> Error {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ConfigError::NotFound {
                        path: path.display().to_string(),
                    }
                    .into()
                } else {
                    StorageError::from_io_with_path(&e, path).into()
                }
            })?;

        let config: Self = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            message: format!("{}: {e}", path.display()),
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load configuration with fallback to defaults
    ///
    /// `rpmkit.toml` in the working directory wins over the user-level file.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let local = PathBuf::from(constants::LOCAL_CONFIG_FILE);
        if fs::try_exists(&local).await.unwrap_or(false) {
            return Self::load_from_file(&local).await;
        }

        // No user config dir (e.g. minimal containers) just means defaults
        if let Ok(user) = Self::default_path() {
            if fs::try_exists(&user).await.unwrap_or(false) {
                return Self::load_from_file(&user).await;
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from an optional path or use default
    ///
    /// If path is provided, loads from that file.
    /// If path is None, uses the default loading behavior.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        if let Ok(dir) = std::env::var(constants::ENV_DIST_DIR) {
            self.paths.dist_dir = PathBuf::from(dir);
        }

        if let Ok(dir) = std::env::var(constants::ENV_REPOSITORY_DIR) {
            self.paths.repository_dir = PathBuf::from(dir);
        }

        if let Ok(command) = std::env::var(constants::ENV_COMPOSE) {
            self.build.compose_command = split_command(constants::ENV_COMPOSE, &command)?;
        }

        if let Ok(command) = std::env::var(constants::ENV_MAKE) {
            self.repository.make_command = split_command(constants::ENV_MAKE, &command)?;
        }

        if let Ok(version) = std::env::var(constants::ENV_OS_VERSION) {
            self.build.default_os_version =
                version
                    .parse::<OsVersion>()
                    .map_err(|_| ConfigError::InvalidValue {
                        field: constants::ENV_OS_VERSION.to_string(),
                        value: version,
                    })?;
        }

        if let Ok(color) = std::env::var(constants::ENV_COLOR) {
            self.general.color = match color.as_str() {
                "always" => ColorChoice::Always,
                "auto" => ColorChoice::Auto,
                "never" => ColorChoice::Never,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: constants::ENV_COLOR.to_string(),
                        value: color,
                    }
                    .into())
                }
            };
        }

        Ok(())
    }

    /// Check invariants serde cannot express
    ///
    /// # Errors
    ///
    /// Returns an error if a command list is empty or a name is blank.
    pub fn validate(&self) -> Result<(), Error> {
        if self.build.compose_command.is_empty() {
            return Err(ConfigError::Invalid {
                message: "build.compose_command must name a program".to_string(),
            }
            .into());
        }
        if self.repository.make_command.is_empty() {
            return Err(ConfigError::Invalid {
                message: "repository.make_command must name a program".to_string(),
            }
            .into());
        }
        if self.build.artifact_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "build.artifact_name".to_string(),
                value: self.build.artifact_name.clone(),
            }
            .into());
        }
        Ok(())
    }

    /// Resolve the configured directories into absolute paths
    ///
    /// Like make's `abspath`, this is purely lexical: the directories do not
    /// need to exist yet and symbolic links are left alone.
    ///
    /// # Errors
    ///
    /// Returns an error if no base directory is configured and the current
    /// working directory cannot be determined.
    pub fn resolve_paths(&self) -> Result<ResolvedPaths, Error> {
        let cwd = std::env::current_dir()?;
        let base_dir = match &self.paths.base_dir {
            Some(dir) => normalize(&cwd.join(dir)),
            None => normalize(&cwd),
        };
        Ok(ResolvedPaths {
            dist_dir: normalize(&base_dir.join(&self.paths.dist_dir)),
            repository_dir: normalize(&base_dir.join(&self.paths.repository_dir)),
            base_dir,
        })
    }
}

fn split_command(field: &str, value: &str) -> Result<Vec<String>, Error> {
    let parts: Vec<String> = value.split_whitespace().map(str::to_string).collect();
    if parts.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        }
        .into());
    }
    Ok(parts)
}

/// Lexically collapse `.` and `..` components of an absolute path
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
