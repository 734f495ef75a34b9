//! Integration tests for the build orchestrator
#![cfg(unix)]

use async_trait::async_trait;
use rpmkit_config::{Config, ResolvedPaths};
use rpmkit_errors::{BuildError, Error, RepositoryError};
use rpmkit_events::{AppEvent, EventReceiver, Step, StepEvent};
use rpmkit_ops::{OpsContextBuilder, OpsCtx, OperationResult};
use rpmkit_platform::{CommandOutput, PlatformCommand, PlatformContext, ProcessOperations};
use rpmkit_types::{OsVersion, PlacementMethod, Target};
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Records every command and answers with a scripted exit status
#[derive(Default)]
struct RecordingRunner {
    calls: Mutex<Vec<Vec<String>>>,
    /// Last argument that should fail, with its exit code
    fail_on: Option<(String, i32)>,
    /// Artifact the fake container leaves behind on success
    produces: Option<PathBuf>,
}

impl RecordingRunner {
    fn failing(last_arg: &str, code: i32) -> Self {
        Self {
            fail_on: Some((last_arg.to_string(), code)),
            ..Self::default()
        }
    }

    fn producing(link: PathBuf) -> Self {
        Self {
            produces: Some(link),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProcessOperations for RecordingRunner {
    async fn execute_command(
        &self,
        _ctx: &PlatformContext,
        cmd: PlatformCommand,
    ) -> Result<CommandOutput, Error> {
        let mut argv = vec![cmd.program().to_string()];
        argv.extend(cmd.get_args().iter().cloned());
        let last = argv.last().cloned().unwrap_or_default();
        self.calls.lock().unwrap().push(argv);

        let code = match &self.fail_on {
            Some((arg, code)) if *arg == last => *code,
            _ => 0,
        };
        if code == 0 && cmd.program() == "docker-compose" {
            if let Some(link) = &self.produces {
                write_artifact(link, "pkg-1.0-1.el7.noarch.rpm", b"built");
            }
        }

        Ok(CommandOutput {
            status: ExitStatus::from_raw(code << 8),
            stdout: Vec::new(),
            stderr: Vec::new(),
        })
    }
}

/// Real file next to `link`, with `link` pointing at it
fn write_artifact(link: &Path, real_name: &str, contents: &[u8]) -> PathBuf {
    let dir = link.parent().unwrap();
    std::fs::create_dir_all(dir).unwrap();
    let real = dir.join(real_name);
    std::fs::write(&real, contents).unwrap();
    let _ = std::fs::remove_file(link);
    std::os::unix::fs::symlink(&real, link).unwrap();
    real
}

struct Fixture {
    temp: TempDir,
    paths: ResolvedPaths,
}

impl Fixture {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let base_dir = temp.path().join("pkg").join("packaging");
        let dist_dir = temp.path().join("pkg").join("dist");
        let repository_dir = temp.path().join("yum-labs");
        std::fs::create_dir_all(&base_dir).unwrap();
        std::fs::create_dir_all(&dist_dir).unwrap();
        std::fs::create_dir_all(&repository_dir).unwrap();
        Self {
            temp,
            paths: ResolvedPaths {
                base_dir,
                dist_dir,
                repository_dir,
            },
        }
    }

    fn link(&self) -> PathBuf {
        self.paths.dist_dir.join("last_build.rpm")
    }

    fn destination(&self, version: u32) -> PathBuf {
        self.paths
            .repository_dir
            .join("rpms")
            .join(format!("CentOS{version}-x86_64"))
    }

    fn ctx(&self, runner: &Arc<RecordingRunner>) -> (OpsCtx, EventReceiver) {
        let (tx, rx) = rpmkit_events::channel();
        let ctx = OpsContextBuilder::new()
            .with_config(Config::default())
            .with_paths(self.paths.clone())
            .with_process(runner.clone())
            .with_event_sender(tx)
            .build()
            .unwrap();
        (ctx, rx)
    }
}

fn make_call(repository_dir: &Path, target: &str) -> Vec<String> {
    vec![
        "make".to_string(),
        "-C".to_string(),
        repository_dir.display().to_string(),
        target.to_string(),
    ]
}

fn version(n: u32) -> OsVersion {
    OsVersion::new(n).unwrap()
}

fn drain(rx: &mut EventReceiver) -> Vec<AppEvent> {
    let mut events = Vec::new();
    while let Ok(message) = rx.try_recv() {
        events.push(message.event);
    }
    events
}

#[tokio::test]
async fn build_runs_profile_once_and_hard_links_artifact() {
    let fixture = Fixture::new();
    let runner = Arc::new(RecordingRunner::producing(fixture.link()));
    let (ctx, _rx) = fixture.ctx(&runner);

    let report = rpmkit_ops::build(&ctx, version(8)).await.unwrap();

    assert_eq!(
        runner.calls(),
        vec![vec![
            "docker-compose".to_string(),
            "run".to_string(),
            "--rm".to_string(),
            "centos8".to_string(),
        ]]
    );
    assert_eq!(report.profile, "centos8");
    assert_eq!(report.method, PlacementMethod::HardLink);

    let placed = fixture.destination(8).join("pkg-1.0-1.el7.noarch.rpm");
    assert_eq!(report.destination, placed);
    assert_eq!(std::fs::read(&placed).unwrap(), b"built");
    // the real file is placed, not the link
    assert!(!std::fs::symlink_metadata(&placed)
        .unwrap()
        .file_type()
        .is_symlink());
}

#[tokio::test]
async fn build_accepts_existing_destination_and_replaces_stale_file() {
    let fixture = Fixture::new();
    let destination = fixture.destination(7);
    std::fs::create_dir_all(&destination).unwrap();
    std::fs::write(destination.join("pkg-1.0-1.el7.noarch.rpm"), b"stale").unwrap();

    let runner = Arc::new(RecordingRunner::producing(fixture.link()));
    let (ctx, _rx) = fixture.ctx(&runner);

    rpmkit_ops::build(&ctx, version(7)).await.unwrap();
    rpmkit_ops::build(&ctx, version(7)).await.unwrap();

    assert_eq!(
        std::fs::read(destination.join("pkg-1.0-1.el7.noarch.rpm")).unwrap(),
        b"built"
    );
    assert_eq!(runner.calls().len(), 2);
}

#[tokio::test]
async fn compose_failure_skips_directory_and_placement() {
    let fixture = Fixture::new();
    write_artifact(&fixture.link(), "old.rpm", b"previous build");
    let runner = Arc::new(RecordingRunner::failing("centos7", 2));
    let (ctx, mut rx) = fixture.ctx(&runner);

    let err = rpmkit_ops::build(&ctx, version(7)).await.unwrap_err();

    assert!(matches!(
        err,
        Error::Build(BuildError::ComposeFailed { code: Some(2), .. })
    ));
    assert_eq!(err.exit_code(), 2);
    assert!(!fixture.paths.repository_dir.join("rpms").exists());

    let events = drain(&mut rx);
    assert!(events.iter().any(|e| matches!(
        e,
        AppEvent::Step(StepEvent::StepFailed {
            step: Step::Compose { .. },
            ..
        })
    )));
    assert!(!events.iter().any(|e| matches!(
        e,
        AppEvent::Step(StepEvent::StepStarted {
            step: Step::PlaceArtifact,
            ..
        })
    )));
}

#[tokio::test]
async fn missing_artifact_after_successful_build_is_an_error() {
    let fixture = Fixture::new();
    let runner = Arc::new(RecordingRunner::default());
    let (ctx, _rx) = fixture.ctx(&runner);

    let err = rpmkit_ops::build(&ctx, version(7)).await.unwrap_err();

    assert!(matches!(
        err,
        Error::Build(BuildError::ArtifactMissing { .. })
    ));
    assert_eq!(err.exit_code(), 1);
    // the destination step already ran
    assert!(fixture.destination(7).is_dir());
}

#[tokio::test]
async fn all_cleans_before_building_default_version() {
    let fixture = Fixture::new();
    let runner = Arc::new(RecordingRunner::producing(fixture.link()));
    let (ctx, _rx) = fixture.ctx(&runner);

    let report = rpmkit_ops::all(&ctx).await.unwrap();

    let calls = runner.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], make_call(&fixture.paths.repository_dir, "clean"));
    assert_eq!(calls[1].last().map(String::as_str), Some("centos7"));
    assert_eq!(report.target, Target::All);
    assert_eq!(report.repository_steps.len(), 1);
    assert!(report.build.is_some());
}

#[tokio::test]
async fn all_stops_when_clean_fails() {
    let fixture = Fixture::new();
    let runner = Arc::new(RecordingRunner::failing("clean", 2));
    let (ctx, _rx) = fixture.ctx(&runner);

    let err = rpmkit_ops::all(&ctx).await.unwrap_err();

    assert_eq!(err.exit_code(), 2);
    assert_eq!(runner.calls().len(), 1);
}

#[tokio::test]
async fn push_runs_publish_reindex_clean_in_order() {
    let fixture = Fixture::new();
    let runner = Arc::new(RecordingRunner::default());
    let (ctx, _rx) = fixture.ctx(&runner);

    let report = rpmkit_ops::push(&ctx).await.unwrap();

    let repo = &fixture.paths.repository_dir;
    assert_eq!(
        runner.calls(),
        vec![
            make_call(repo, "push"),
            make_call(repo, "createrepos"),
            make_call(repo, "clean"),
        ]
    );
    let steps: Vec<&str> = report
        .repository_steps
        .iter()
        .map(|s| s.step.as_str())
        .collect();
    assert_eq!(steps, ["push", "createrepos", "clean"]);
    assert!(report.build.is_none());
}

#[tokio::test]
async fn push_aborts_at_first_failure_with_its_code() {
    let fixture = Fixture::new();
    let runner = Arc::new(RecordingRunner::failing("createrepos", 3));
    let (ctx, _rx) = fixture.ctx(&runner);

    let err = rpmkit_ops::push(&ctx).await.unwrap_err();

    assert!(matches!(
        &err,
        Error::Repository(RepositoryError::StepFailed { step, code: Some(3) }) if step == "createrepos"
    ));
    assert_eq!(err.exit_code(), 3);
    assert_eq!(runner.calls().len(), 2);
}

#[tokio::test]
async fn push_reports_missing_repository() {
    let fixture = Fixture::new();
    std::fs::remove_dir(&fixture.paths.repository_dir).unwrap();
    let runner = Arc::new(RecordingRunner::default());
    let (ctx, _rx) = fixture.ctx(&runner);

    let err = rpmkit_ops::push(&ctx).await.unwrap_err();

    assert!(matches!(
        err,
        Error::Repository(RepositoryError::NotFound { .. })
    ));
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn run_targets_stops_at_first_failing_target() {
    let fixture = Fixture::new();
    let runner = Arc::new(RecordingRunner::failing("centos7", 5));
    let (ctx, mut rx) = fixture.ctx(&runner);

    let err = rpmkit_ops::run_targets(&ctx, &[Target::Build(version(7)), Target::Push])
        .await
        .unwrap_err();

    assert_eq!(err.exit_code(), 5);
    assert_eq!(runner.calls().len(), 1);

    let events = drain(&mut rx);
    assert!(matches!(
        events.first(),
        Some(AppEvent::Step(StepEvent::TargetStarted { .. }))
    ));
    assert!(matches!(
        events.last(),
        Some(AppEvent::Step(StepEvent::TargetFailed { .. }))
    ));
}

#[tokio::test]
async fn reports_serialize_for_cli_output() {
    let fixture = Fixture::new();
    let runner = Arc::new(RecordingRunner::default());
    let (ctx, _rx) = fixture.ctx(&runner);

    let reports = rpmkit_ops::run_targets(&ctx, &[Target::Push]).await.unwrap();
    let json = OperationResult::Targets(reports).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["type"], "targets");
    assert_eq!(value["data"][0]["target"]["target"], "push");
    assert_eq!(value["data"][0]["repository_steps"][2]["step"], "clean");
}

#[tokio::test]
async fn shell_tools_drive_a_full_build_and_push() {
    let fixture = Fixture::new();
    let scripts = fixture.temp.path().join("bin");
    std::fs::create_dir_all(&scripts).unwrap();
    let log = fixture.temp.path().join("calls.log");
    let dist = &fixture.paths.dist_dir;

    let compose = scripts.join("compose.sh");
    std::fs::write(
        &compose,
        format!(
            "echo \"compose $*\" >> '{log}'\n\
             echo rpm > '{dist}/pkg-2.0-1.el7.x86_64.rpm'\n\
             ln -sf '{dist}/pkg-2.0-1.el7.x86_64.rpm' '{dist}/last_build.rpm'\n",
            log = log.display(),
            dist = dist.display(),
        ),
    )
    .unwrap();
    let make = scripts.join("make.sh");
    std::fs::write(
        &make,
        format!("echo \"make $3\" >> '{}'\n", log.display()),
    )
    .unwrap();

    let mut config = Config::default();
    config.build.compose_command = vec!["sh".to_string(), compose.display().to_string()];
    config.repository.make_command = vec!["sh".to_string(), make.display().to_string()];
    let ctx = OpsContextBuilder::new()
        .with_config(config)
        .with_paths(fixture.paths.clone())
        .build()
        .unwrap();

    rpmkit_ops::run_targets(&ctx, &[Target::All, Target::Push])
        .await
        .unwrap();

    let logged = std::fs::read_to_string(&log).unwrap();
    let lines: Vec<&str> = logged.lines().collect();
    assert_eq!(
        lines,
        [
            "make clean",
            "compose run --rm centos7",
            "make push",
            "make createrepos",
            "make clean",
        ]
    );
    assert!(fixture
        .destination(7)
        .join("pkg-2.0-1.el7.x86_64.rpm")
        .is_file());
}

#[tokio::test]
async fn shell_tool_exit_code_propagates() {
    let fixture = Fixture::new();
    let make = fixture.temp.path().join("make.sh");
    std::fs::write(&make, "[ \"$3\" = push ] && exit 7\nexit 0\n").unwrap();

    let mut config = Config::default();
    config.repository.make_command = vec!["sh".to_string(), make.display().to_string()];
    let ctx = OpsContextBuilder::new()
        .with_config(config)
        .with_paths(fixture.paths.clone())
        .build()
        .unwrap();

    let err = rpmkit_ops::push(&ctx).await.unwrap_err();
    assert_eq!(err.exit_code(), 7);
}
