//! Built-in defaults and the names rpmkit looks for in the environment

use rpmkit_types::OsVersion;

/// Project-local configuration file, looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "rpmkit.toml";
/// Directory under the user config dir holding `config.toml`
pub const CONFIG_DIR_NAME: &str = "rpmkit";
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const DEFAULT_DIST_DIR: &str = "../dist";
pub const DEFAULT_REPOSITORY_DIR: &str = "../../yum-labs";

pub const DEFAULT_COMPOSE_PROGRAM: &str = "docker-compose";
pub const DEFAULT_PROFILE_PREFIX: &str = "centos";
pub const DEFAULT_ARTIFACT_NAME: &str = "last_build.rpm";
pub const DEFAULT_OS_VERSION: OsVersion = match OsVersion::new(7) {
    Some(version) => version,
    None => panic!("default OS version must be non-zero"),
};

pub const DEFAULT_MAKE_PROGRAM: &str = "make";
pub const DEFAULT_RPMS_SUBDIR: &str = "rpms";
pub const DEFAULT_DEST_PREFIX: &str = "CentOS";
pub const DEFAULT_ARCH: &str = "x86_64";
pub const DEFAULT_CLEAN_TARGET: &str = "clean";
pub const DEFAULT_PUBLISH_TARGET: &str = "push";
pub const DEFAULT_REINDEX_TARGET: &str = "createrepos";

pub const ENV_DIST_DIR: &str = "RPMKIT_DIST_DIR";
pub const ENV_REPOSITORY_DIR: &str = "RPMKIT_REPOSITORY_DIR";
pub const ENV_COMPOSE: &str = "RPMKIT_COMPOSE";
pub const ENV_MAKE: &str = "RPMKIT_MAKE";
pub const ENV_OS_VERSION: &str = "RPMKIT_OS_VERSION";
pub const ENV_COLOR: &str = "RPMKIT_COLOR";
