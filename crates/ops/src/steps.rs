//! Step bookkeeping shared by every target

use crate::OpsCtx;
use rpmkit_errors::Error;
use rpmkit_events::{AppEvent, EventEmitter, FailureContext, Step, StepEvent};
use rpmkit_types::Target;
use std::future::Future;
use std::time::{Duration, Instant};

pub(crate) fn duration_to_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Run one step, emitting started/completed/failed events around it
pub(crate) async fn run_step<T, F>(
    ctx: &OpsCtx,
    target: Target,
    step: Step,
    command: Option<String>,
    work: F,
) -> Result<(T, Duration), Error>
where
    F: Future<Output = Result<T, Error>>,
{
    let correlation = target.to_string();
    ctx.emit_for(
        &correlation,
        AppEvent::Step(StepEvent::StepStarted {
            target,
            step: step.clone(),
            command,
        }),
    );

    let start = Instant::now();
    let result = work.await;
    let elapsed = start.elapsed();

    match result {
        Ok(value) => {
            ctx.emit_for(
                &correlation,
                AppEvent::Step(StepEvent::StepCompleted {
                    target,
                    step,
                    duration_ms: duration_to_millis(elapsed),
                }),
            );
            Ok((value, elapsed))
        }
        Err(e) => {
            ctx.emit_for(
                &correlation,
                AppEvent::Step(StepEvent::StepFailed {
                    target,
                    step,
                    failure: FailureContext::from_error(&e),
                    duration_ms: duration_to_millis(elapsed),
                }),
            );
            Err(e)
        }
    }
}
