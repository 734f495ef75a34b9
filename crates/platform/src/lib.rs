#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Platform layer for the rpmkit orchestrator.
//!
//! This crate provides:
//! - Process execution behind the [`ProcessOperations`] trait, with event
//!   emission for every spawned command
//! - Filesystem helpers for placing build artifacts (hard link with copy
//!   fallback, artifact link resolution)

pub mod context;
pub mod fs;
pub mod process;

pub use context::PlatformContext;
pub use process::{CommandOutput, PlatformCommand, ProcessOperations, TokioProcessOperations};
