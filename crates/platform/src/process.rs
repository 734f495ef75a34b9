//! Process execution operations

use async_trait::async_trait;
use rpmkit_errors::{Error, PlatformError, UserFacingError};
use rpmkit_events::{
    AppEvent, EventEmitter, FailureContext, PlatformEvent, ProcessCommandDescriptor,
};
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tokio::process::Command;

use crate::context::PlatformContext;

/// Platform-specific command builder and execution
#[derive(Debug, Clone)]
pub struct PlatformCommand {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
    stream_output: bool,
}

impl PlatformCommand {
    /// Create a new platform command
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            args: Vec::new(),
            current_dir: None,
            stream_output: false,
        }
    }

    /// Build a command from a configured `[program, leading args...]` list
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty.
    pub fn from_argv(argv: &[String]) -> Result<Self, Error> {
        let (program, rest) = argv.split_first().ok_or_else(|| PlatformError::CommandNotFound {
            command: String::new(),
        })?;
        let mut cmd = Self::new(program);
        cmd.args(rest);
        Ok(cmd)
    }

    /// Add an argument to the command
    pub fn arg<S: AsRef<str>>(&mut self, arg: S) -> &mut Self {
        self.args.push(arg.as_ref().to_string());
        self
    }

    /// Add multiple arguments to the command
    pub fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for arg in args {
            self.args.push(arg.as_ref().to_string());
        }
        self
    }

    /// Set the working directory for the command
    pub fn current_dir<P: Into<PathBuf>>(&mut self, dir: P) -> &mut Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Let the child write straight to our stderr instead of capturing
    pub fn stream_output(&mut self, stream: bool) -> &mut Self {
        self.stream_output = stream;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn get_current_dir(&self) -> Option<&PathBuf> {
        self.current_dir.as_ref()
    }

    pub fn is_streaming(&self) -> bool {
        self.stream_output
    }

    /// Descriptor used in events and error messages
    pub fn descriptor(&self) -> ProcessCommandDescriptor {
        ProcessCommandDescriptor {
            program: self.program.clone(),
            args: self.args.clone(),
            cwd: self.current_dir.clone(),
        }
    }
}

/// Output from command execution
///
/// `stdout` and `stderr` stay empty for streamed commands.
#[derive(Debug)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// Trait for process execution operations
///
/// Implementations only fail when the process cannot be run at all; a
/// non-zero exit is reported through `CommandOutput::status`.
#[async_trait]
pub trait ProcessOperations: Send + Sync {
    /// Execute a command and wait for it to exit
    async fn execute_command(
        &self,
        ctx: &PlatformContext,
        cmd: PlatformCommand,
    ) -> Result<CommandOutput, Error>;
}

/// Process execution on top of `tokio::process`
#[derive(Debug, Default)]
pub struct TokioProcessOperations;

impl TokioProcessOperations {
    pub fn new() -> Self {
        Self
    }
}

fn duration_to_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn spawn_error(program: &str, err: &std::io::Error) -> PlatformError {
    match err.kind() {
        std::io::ErrorKind::NotFound => PlatformError::CommandNotFound {
            command: program.to_string(),
        },
        std::io::ErrorKind::PermissionDenied => PlatformError::PermissionDenied {
            operation: format!("execute {program}"),
            message: err.to_string(),
        },
        _ => PlatformError::ProcessExecutionFailed {
            command: program.to_string(),
            message: err.to_string(),
        },
    }
}

#[async_trait]
impl ProcessOperations for TokioProcessOperations {
    async fn execute_command(
        &self,
        ctx: &PlatformContext,
        cmd: PlatformCommand,
    ) -> Result<CommandOutput, Error> {
        let start = Instant::now();
        let descriptor = cmd.descriptor();

        ctx.emit(AppEvent::Platform(PlatformEvent::ProcessStarted {
            command: descriptor.clone(),
        }));
        tracing::debug!(command = %descriptor, cwd = ?descriptor.cwd, "spawning process");

        let mut command = Command::new(cmd.program());
        command.args(cmd.get_args());
        if let Some(dir) = cmd.get_current_dir() {
            command.current_dir(dir);
        }
        // Dropping the future must not leave an orphaned container run behind
        command.kill_on_drop(true);

        let result = if cmd.is_streaming() {
            command
                .stdin(Stdio::inherit())
                // stdout is reserved for rpmkit's own report
                .stdout(Stdio::from(std::io::stderr()))
                .stderr(Stdio::inherit())
                .status()
                .await
                .map(|status| CommandOutput {
                    status,
                    stdout: Vec::new(),
                    stderr: Vec::new(),
                })
        } else {
            command.output().await.map(|output| CommandOutput {
                status: output.status,
                stdout: output.stdout,
                stderr: output.stderr,
            })
        };

        let duration = start.elapsed();
        match result {
            Ok(output) => {
                ctx.emit(AppEvent::Platform(PlatformEvent::ProcessCompleted {
                    command: descriptor,
                    exit_code: output.status.code(),
                    duration_ms: duration_to_millis(duration),
                }));
                Ok(output)
            }
            Err(e) => {
                let error = spawn_error(cmd.program(), &e);
                ctx.emit(AppEvent::Platform(PlatformEvent::ProcessFailed {
                    command: descriptor,
                    failure: FailureContext::from_error(&error),
                    duration_ms: duration_to_millis(duration),
                }));
                tracing::debug!(error = %error.user_message(), "process could not be started");
                Err(error.into())
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> PlatformCommand {
        let mut cmd = PlatformCommand::new("sh");
        cmd.arg("-c").arg(script);
        cmd
    }

    #[tokio::test]
    async fn captures_output_and_exit_status() {
        let ops = TokioProcessOperations::new();
        let ctx = PlatformContext::default();

        let output = ops
            .execute_command(&ctx, sh("echo hello; exit 3"))
            .await
            .unwrap();
        assert_eq!(output.status.code(), Some(3));
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "hello");
    }

    #[tokio::test]
    async fn runs_in_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        let ops = TokioProcessOperations::new();
        let ctx = PlatformContext::default();

        let mut cmd = sh("pwd");
        cmd.current_dir(dir.path());
        let output = ops.execute_command(&ctx, cmd).await.unwrap();
        let stdout = String::from_utf8_lossy(&output.stdout);
        let pwd = std::path::PathBuf::from(stdout.trim());
        assert_eq!(
            pwd.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }

    #[tokio::test]
    async fn missing_program_is_command_not_found() {
        let ops = TokioProcessOperations::new();
        let (tx, mut rx) = rpmkit_events::channel();
        let ctx = PlatformContext::new(Some(tx));

        let err = ops
            .execute_command(&ctx, PlatformCommand::new("rpmkit-definitely-missing-tool"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Platform(PlatformError::CommandNotFound { .. })
        ));
        assert_eq!(err.exit_code(), 127);

        let started = rx.recv().await.unwrap();
        assert!(matches!(
            started.event,
            AppEvent::Platform(PlatformEvent::ProcessStarted { .. })
        ));
        let failed = rx.recv().await.unwrap();
        assert!(matches!(
            failed.event,
            AppEvent::Platform(PlatformEvent::ProcessFailed { .. })
        ));
    }

    #[test]
    fn from_argv_splits_program_and_leading_args() {
        let argv = vec!["docker".to_string(), "compose".to_string()];
        let mut cmd = PlatformCommand::from_argv(&argv).unwrap();
        cmd.arg("run");
        assert_eq!(cmd.program(), "docker");
        assert_eq!(cmd.get_args(), ["compose", "run"]);
        assert_eq!(cmd.descriptor().to_string(), "docker compose run");

        assert!(PlatformCommand::from_argv(&[]).is_err());
    }
}
