//! Containerized package build and artifact placement

use crate::steps::{duration_to_millis, run_step};
use crate::OpsCtx;
use rpmkit_errors::{BuildError, Error};
use rpmkit_events::Step;
use rpmkit_platform::{fs, PlatformCommand};
use rpmkit_types::{BuildReport, OsVersion, Target};
use std::time::Instant;

/// Compose invocation for a profile: `<compose> [-f <file>] run --rm <profile>`
fn compose_command(ctx: &OpsCtx, profile: &str) -> Result<PlatformCommand, Error> {
    let build = &ctx.config.build;
    let mut cmd = PlatformCommand::from_argv(&build.compose_command)?;
    if let Some(file) = &build.compose_file {
        let file = ctx.paths.base_dir.join(file);
        cmd.arg("-f").arg(file.to_string_lossy());
    }
    cmd.args(["run", "--rm", profile])
        .current_dir(&ctx.paths.base_dir)
        .stream_output(true);
    Ok(cmd)
}

/// Build for `version` as part of `target` and place the artifact in the
/// repository
///
/// Steps run strictly in order and the first failure stops the rest:
/// 1. containerized build of profile `<prefix><version>`
/// 2. create `<repository>/<rpms>/<Prefix><version>-<arch>`
/// 3. resolve the artifact link and link (or copy) the real file into it
///
/// # Errors
///
/// Returns an error if the container exits non-zero, the destination cannot
/// be created, the artifact is missing, or placing it fails.
pub(crate) async fn build_for(
    ctx: &OpsCtx,
    target: Target,
    version: OsVersion,
) -> Result<BuildReport, Error> {
    let start = Instant::now();
    let profile = ctx.config.build.profile(version);
    let platform = ctx.platform_context(target);

    let cmd = compose_command(ctx, &profile)?;
    let rendered = cmd.descriptor().to_string();
    tracing::info!(%target, %profile, "starting containerized build");
    run_step(
        ctx,
        target,
        Step::Compose {
            profile: profile.clone(),
        },
        Some(rendered),
        async {
            let output = ctx.process.execute_command(&platform, cmd).await?;
            if output.status.success() {
                Ok(())
            } else {
                Err(BuildError::ComposeFailed {
                    profile: profile.clone(),
                    code: output.status.code(),
                }
                .into())
            }
        },
    )
    .await?;

    let destination_dir = ctx
        .config
        .repository
        .destination_dir(&ctx.paths.repository_dir, version);
    run_step(
        ctx,
        target,
        Step::PrepareDestination,
        None,
        fs::create_dir_all(&destination_dir),
    )
    .await?;

    let link = ctx.paths.dist_dir.join(&ctx.config.build.artifact_name);
    let ((artifact, destination, method), _) =
        run_step(ctx, target, Step::PlaceArtifact, None, async {
            let artifact = fs::resolve_artifact(&platform, &link).await?;
            let file_name = artifact.file_name().ok_or_else(|| BuildError::InvalidPath {
                path: artifact.display().to_string(),
                reason: "artifact has no file name".to_string(),
            })?;
            let destination = destination_dir.join(file_name);
            let method = fs::link_or_copy(&platform, &artifact, &destination).await?;
            Ok((artifact, destination, method))
        })
        .await?;

    Ok(BuildReport {
        os_version: version,
        profile,
        artifact,
        destination,
        method,
        duration_ms: duration_to_millis(start.elapsed()),
    })
}
