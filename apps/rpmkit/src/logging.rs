//! Structured logging integration for events
//!
//! Every event drained from the channel becomes one tracing record with
//! structured fields, so `--json` yields a machine-readable trail of the run.

use rpmkit_events::{AppEvent, ArtifactEvent, EventMessage, PlatformEvent, StepEvent};
use tracing::{debug, error, info, warn};

/// Log an `EventMessage` through tracing at the level its event carries
#[allow(clippy::too_many_lines)]
pub fn log_event_with_tracing(message: &EventMessage) {
    let meta = &message.meta;
    match &message.event {
        AppEvent::Step(step_event) => match step_event {
            StepEvent::TargetStarted { target } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    target = %target,
                    "Target started"
                );
            }
            StepEvent::TargetCompleted {
                target,
                duration_ms,
            } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    target = %target,
                    duration_ms = duration_ms,
                    "Target completed"
                );
            }
            StepEvent::TargetFailed { target, failure } => {
                error!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    target = %target,
                    code = ?failure.code,
                    message = %failure.message,
                    hint = ?failure.hint,
                    "Target failed"
                );
            }
            StepEvent::StepStarted {
                target,
                step,
                command,
            } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    target = %target,
                    step = %step,
                    command = ?command,
                    "Step started"
                );
            }
            StepEvent::StepCompleted {
                target,
                step,
                duration_ms,
            } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    target = %target,
                    step = %step,
                    duration_ms = duration_ms,
                    "Step completed"
                );
            }
            StepEvent::StepFailed {
                target,
                step,
                failure,
                duration_ms,
            } => {
                error!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    target = %target,
                    step = %step,
                    duration_ms = duration_ms,
                    code = ?failure.code,
                    message = %failure.message,
                    hint = ?failure.hint,
                    "Step failed"
                );
            }
        },

        AppEvent::Artifact(artifact_event) => match artifact_event {
            ArtifactEvent::Resolved { link, real } => {
                debug!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    link = %link.display(),
                    real = %real.display(),
                    "Artifact resolved"
                );
            }
            ArtifactEvent::LinkFallback {
                source,
                destination,
                reason,
            } => {
                warn!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    artifact = %source.display(),
                    destination = %destination.display(),
                    reason = %reason,
                    "Hard link refused, copied instead"
                );
            }
            ArtifactEvent::Placed {
                source,
                destination,
                method,
            } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    artifact = %source.display(),
                    destination = %destination.display(),
                    method = ?method,
                    "Artifact placed"
                );
            }
        },

        AppEvent::Platform(platform_event) => match platform_event {
            PlatformEvent::ProcessStarted { command } => {
                debug!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    command = %command,
                    cwd = ?command.cwd,
                    "Process started"
                );
            }
            PlatformEvent::ProcessCompleted {
                command,
                exit_code,
                duration_ms,
            } => {
                debug!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    command = %command,
                    exit_code = ?exit_code,
                    duration_ms = duration_ms,
                    "Process completed"
                );
            }
            PlatformEvent::ProcessFailed {
                command,
                failure,
                duration_ms,
            } => {
                debug!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    command = %command,
                    duration_ms = duration_ms,
                    code = ?failure.code,
                    message = %failure.message,
                    "Process could not be started"
                );
            }
        },
    }
}
