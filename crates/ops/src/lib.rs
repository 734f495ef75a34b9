#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Build orchestration for rpmkit
//!
//! This crate sits between the CLI and the platform layer. Each target is a
//! fixed, strictly sequential list of steps; the first failing step ends the
//! target and no completed step is undone.

mod build;
mod context;
mod repository;
mod steps;

pub use context::{OpsContextBuilder, OpsCtx};

use rpmkit_errors::Error;
use rpmkit_events::{AppEvent, EventEmitter, FailureContext, StepEvent};
use rpmkit_types::{BuildReport, OsVersion, Target, TargetReport};
use std::time::Instant;

/// Operation result that can be serialized for CLI output
#[derive(Clone, Debug, serde::Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum OperationResult {
    /// One report per target, in the order they ran
    Targets(Vec<TargetReport>),
}

impl OperationResult {
    /// Convert to JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(Error::from)
    }
}

/// Clean the package repository, then build for the default OS version
///
/// # Errors
///
/// Returns the first failure; when the clean step fails the build is never
/// attempted.
pub async fn all(ctx: &OpsCtx) -> Result<TargetReport, Error> {
    run_target(ctx, Target::All).await
}

/// Containerized build for `version`, artifact placed in the repository
///
/// # Errors
///
/// Returns an error if any build step fails.
pub async fn build(ctx: &OpsCtx, version: OsVersion) -> Result<BuildReport, Error> {
    let report = run_target(ctx, Target::Build(version)).await?;
    report
        .build
        .ok_or_else(|| Error::internal("build target finished without a build report"))
}

/// Publish the repository, regenerate its indices, then clean it
///
/// # Errors
///
/// Returns the first failing step's error; later steps are skipped.
pub async fn push(ctx: &OpsCtx) -> Result<TargetReport, Error> {
    run_target(ctx, Target::Push).await
}

/// Run a single target with lifecycle events around it
///
/// # Errors
///
/// Returns the error of the first step that fails.
pub async fn run_target(ctx: &OpsCtx, target: Target) -> Result<TargetReport, Error> {
    let correlation = target.to_string();
    ctx.emit_for(
        &correlation,
        AppEvent::Step(StepEvent::TargetStarted { target }),
    );
    let start = Instant::now();

    let result = execute_target(ctx, target).await;
    let duration_ms = steps::duration_to_millis(start.elapsed());

    match result {
        Ok((repository_steps, build)) => {
            ctx.emit_for(
                &correlation,
                AppEvent::Step(StepEvent::TargetCompleted {
                    target,
                    duration_ms,
                }),
            );
            Ok(TargetReport {
                target,
                repository_steps,
                build,
                duration_ms,
            })
        }
        Err(e) => {
            ctx.emit_for(
                &correlation,
                AppEvent::Step(StepEvent::TargetFailed {
                    target,
                    failure: FailureContext::from_error(&e),
                }),
            );
            Err(e)
        }
    }
}

async fn execute_target(
    ctx: &OpsCtx,
    target: Target,
) -> Result<(Vec<rpmkit_types::RepositoryStepReport>, Option<BuildReport>), Error> {
    match target {
        Target::All => {
            let cleaned = repository::clean(ctx, target).await?;
            let version = ctx.config.build.default_os_version;
            let report = build::build_for(ctx, target, version).await?;
            Ok((vec![cleaned], Some(report)))
        }
        Target::Build(version) => {
            let report = build::build_for(ctx, target, version).await?;
            Ok((Vec::new(), Some(report)))
        }
        Target::Push => Ok((repository::publish(ctx, target).await?, None)),
    }
}

/// Run targets in order, like `make all push`, stopping at the first failure
///
/// # Errors
///
/// Returns the error of the first failing target; later targets never start.
pub async fn run_targets(ctx: &OpsCtx, targets: &[Target]) -> Result<Vec<TargetReport>, Error> {
    let mut reports = Vec::with_capacity(targets.len());
    for &target in targets {
        tracing::debug!(%target, "running target");
        reports.push(run_target(ctx, target).await?);
    }
    Ok(reports)
}
