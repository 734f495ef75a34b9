//! Integration tests for events

#[cfg(test)]
mod tests {
    use rpmkit_errors::BuildError;
    use rpmkit_events::*;
    use rpmkit_types::{PlacementMethod, Target};

    #[tokio::test]
    async fn test_event_sender_emit() {
        let (tx, mut rx) = channel();

        tx.emit(AppEvent::Step(StepEvent::TargetStarted {
            target: Target::Push,
        }));
        tx.emit_for(
            "push",
            AppEvent::Step(StepEvent::TargetCompleted {
                target: Target::Push,
                duration_ms: 3,
            }),
        );

        let event1 = rx.recv().await.unwrap();
        assert!(matches!(
            event1.event,
            AppEvent::Step(StepEvent::TargetStarted { .. })
        ));
        assert!(event1.meta.correlation_id.is_none());

        let event2 = rx.recv().await.unwrap();
        assert!(matches!(
            event2.event,
            AppEvent::Step(StepEvent::TargetCompleted { duration_ms: 3, .. })
        ));
        assert_eq!(event2.meta.correlation_id.as_deref(), Some("push"));
    }

    #[tokio::test]
    async fn test_dropped_receiver() {
        let (tx, rx) = channel();
        drop(rx);

        // Should not panic when receiver is dropped
        tx.emit(AppEvent::Step(StepEvent::TargetStarted {
            target: Target::All,
        }));
    }

    #[test]
    fn test_failure_context_from_error() {
        let failure = FailureContext::from_error(&BuildError::ArtifactMissing {
            path: "/dist/last_build.rpm".into(),
        });
        assert_eq!(failure.code.as_deref(), Some("build.artifact_missing"));
        assert!(failure.message.contains("/dist/last_build.rpm"));
        assert!(failure.hint.is_some());
        assert!(!failure.retryable);
    }

    #[test]
    fn test_levels_follow_severity() {
        let fallback = AppEvent::Artifact(ArtifactEvent::LinkFallback {
            source: "/dist/pkg.rpm".into(),
            destination: "/repo/pkg.rpm".into(),
            reason: "cross-device link".into(),
        });
        assert_eq!(fallback.level(), EventLevel::Warn);

        let placed = AppEvent::Artifact(ArtifactEvent::Placed {
            source: "/dist/pkg.rpm".into(),
            destination: "/repo/pkg.rpm".into(),
            method: PlacementMethod::HardLink,
        });
        assert_eq!(placed.level(), EventLevel::Info);
        assert_eq!(placed.source(), EventSource::ARTIFACT);

        let failed = AppEvent::Step(StepEvent::TargetFailed {
            target: Target::Push,
            failure: FailureContext::from_error(&BuildError::ArtifactMissing {
                path: "x".into(),
            }),
        });
        assert_eq!(failed.level(), EventLevel::Error);
        assert_eq!(
            EventMessage::new(failed).meta.tracing_level(),
            tracing::Level::ERROR
        );
    }

    #[test]
    fn test_message_round_trips_through_json() {
        let message = EventMessage::new(AppEvent::Platform(PlatformEvent::ProcessCompleted {
            command: ProcessCommandDescriptor {
                program: "make".into(),
                args: vec!["-C".into(), "/src/yum-labs".into(), "clean".into()],
                cwd: None,
            },
            exit_code: Some(0),
            duration_ms: 5,
        }))
        .with_correlation_id("all");

        let json = serde_json::to_string(&message).unwrap();
        let back: EventMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back.meta.event_id, message.meta.event_id);
        assert_eq!(back.meta.correlation_id.as_deref(), Some("all"));
        assert!(matches!(
            back.event,
            AppEvent::Platform(PlatformEvent::ProcessCompleted {
                exit_code: Some(0),
                ..
            })
        ));
    }
}
