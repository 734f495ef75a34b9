#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions for rpmkit
//!
//! This crate provides the vocabulary shared by the orchestrator and the
//! CLI: build targets, OS versions and the reports produced by each target.

pub mod reports;
pub mod target;

// Re-export commonly used types
pub use reports::{BuildReport, PlacementMethod, RepositoryStepReport, TargetReport};
pub use target::{OsVersion, Target};

use serde::{Deserialize, Serialize};

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    Always,
    Auto,
    Never,
}

// Implement clap::ValueEnum for ColorChoice
impl clap::ValueEnum for ColorChoice {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Always, Self::Auto, Self::Never]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            Self::Always => clap::builder::PossibleValue::new("always"),
            Self::Auto => clap::builder::PossibleValue::new("auto"),
            Self::Never => clap::builder::PossibleValue::new("never"),
        })
    }
}

impl Default for ColorChoice {
    fn default() -> Self {
        Self::Auto
    }
}
