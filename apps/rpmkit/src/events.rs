//! Event handling and status display

use crate::logging::log_event_with_tracing;
use console::Style;
use rpmkit_events::{AppEvent, ArtifactEvent, EventMessage, StepEvent};
use rpmkit_types::PlacementMethod;

/// Turns orchestrator events into log records and short status lines
pub struct EventHandler {
    colors_enabled: bool,
    /// Status lines go to stderr; suppressed in JSON mode
    show_status: bool,
}

impl EventHandler {
    pub fn new(colors_enabled: bool, json_mode: bool) -> Self {
        Self {
            colors_enabled,
            show_status: !json_mode,
        }
    }

    /// Handle incoming event
    pub fn handle_event(&mut self, message: &EventMessage) {
        log_event_with_tracing(message);
        if !self.show_status {
            return;
        }
        if let Some(line) = self.status_line(&message.event) {
            eprintln!("{line}");
        }
    }

    fn status_line(&self, event: &AppEvent) -> Option<String> {
        match event {
            AppEvent::Step(StepEvent::TargetStarted { target }) => {
                Some(format!("{} {target}", self.paint("==>", &Style::new().blue().bold())))
            }
            AppEvent::Step(StepEvent::StepStarted {
                command: Some(command),
                ..
            }) => Some(format!("{} {command}", self.paint("  $", &Style::new().dim()))),
            AppEvent::Step(StepEvent::TargetCompleted {
                target,
                duration_ms,
            }) => Some(format!(
                "{} {target} ({duration_ms}ms)",
                self.paint("[OK]", &Style::new().green())
            )),
            AppEvent::Step(StepEvent::TargetFailed { target, .. }) => Some(format!(
                "{} {target}",
                self.paint("[FAILED]", &Style::new().red().bold())
            )),
            AppEvent::Artifact(ArtifactEvent::Placed {
                destination,
                method,
                ..
            }) => {
                let verb = match method {
                    PlacementMethod::HardLink => "linked",
                    PlacementMethod::Copy => "copied",
                };
                Some(format!("  {verb} {}", destination.display()))
            }
            AppEvent::Artifact(ArtifactEvent::LinkFallback { reason, .. }) => Some(format!(
                "{} hard link refused ({reason}), copying",
                self.paint("  [WARN]", &Style::new().yellow())
            )),
            _ => None,
        }
    }

    fn paint(&self, text: &str, style: &Style) -> String {
        if self.colors_enabled {
            style.apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }
}
