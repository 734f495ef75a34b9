//! Command line interface definition

use clap::Parser;
use rpmkit_types::{ColorChoice, Target};
use std::path::PathBuf;

/// rpmkit - containerized RPM builds for a local yum repository
#[derive(Parser)]
#[command(name = "rpmkit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Build RPMs in ephemeral containers and publish them to a yum repository")]
#[command(
    after_help = "TARGETS:\n  all              clean the repository, then build for the default version\n  build-centos<N>  build in the centos<N> container and place the package\n  push             publish the repository, regenerate indices, clean"
)]
pub struct Cli {
    /// Targets to run in order; the first failure stops the rest
    #[arg(required = true, value_name = "TARGET")]
    pub targets: Vec<Target>,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments
#[derive(Parser)]
pub struct GlobalArgs {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Color output control
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory the compose file and relative paths are resolved from
    #[arg(long, global = true, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,
}
