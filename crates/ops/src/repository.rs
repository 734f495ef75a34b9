//! Steps delegated to the package repository's own make targets

use crate::steps::{duration_to_millis, run_step};
use crate::OpsCtx;
use rpmkit_errors::{Error, RepositoryError};
use rpmkit_events::Step;
use rpmkit_platform::{fs, PlatformCommand};
use rpmkit_types::{RepositoryStepReport, Target};

/// Run `<make> -C <repository> <make_target>` as one step of `target`
///
/// # Errors
///
/// Returns an error if the repository directory is missing, the program
/// cannot be started, or it exits non-zero.
pub(crate) async fn run_repository_step(
    ctx: &OpsCtx,
    target: Target,
    make_target: &str,
) -> Result<RepositoryStepReport, Error> {
    let repository_dir = &ctx.paths.repository_dir;

    let mut cmd = PlatformCommand::from_argv(&ctx.config.repository.make_command)?;
    cmd.arg("-C")
        .arg(repository_dir.to_string_lossy())
        .arg(make_target)
        .stream_output(true);
    let rendered = cmd.descriptor().to_string();

    let step = Step::Repository {
        target: make_target.to_string(),
    };
    let ((), elapsed) = run_step(ctx, target, step, Some(rendered), async {
        if !fs::exists(repository_dir).await {
            return Err(RepositoryError::NotFound {
                path: repository_dir.display().to_string(),
            }
            .into());
        }

        let platform = ctx.platform_context(target);
        let output = ctx.process.execute_command(&platform, cmd).await?;
        if !output.status.success() {
            return Err(RepositoryError::StepFailed {
                step: make_target.to_string(),
                code: output.status.code(),
            }
            .into());
        }
        Ok(())
    })
    .await?;

    Ok(RepositoryStepReport {
        step: make_target.to_string(),
        duration_ms: duration_to_millis(elapsed),
    })
}

/// Clean the package repository
///
/// # Errors
///
/// Returns an error if the clean target fails.
pub(crate) async fn clean(ctx: &OpsCtx, target: Target) -> Result<RepositoryStepReport, Error> {
    let clean_target = ctx.config.repository.clean_target.clone();
    run_repository_step(ctx, target, &clean_target).await
}

/// Publish, reindex and clean the repository, stopping at the first failure
///
/// # Errors
///
/// Returns the error of the first step that fails; later steps do not run.
pub(crate) async fn publish(ctx: &OpsCtx, target: Target) -> Result<Vec<RepositoryStepReport>, Error> {
    let steps: Vec<String> = ctx
        .config
        .repository
        .push_steps()
        .iter()
        .map(ToString::to_string)
        .collect();

    let mut reports = Vec::with_capacity(steps.len());
    for make_target in &steps {
        reports.push(run_repository_step(ctx, target, make_target).await?);
    }
    Ok(reports)
}
