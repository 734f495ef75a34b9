//! Operations context for dependency injection

use rpmkit_config::{Config, ResolvedPaths};
use rpmkit_errors::Error;
use rpmkit_events::{EventEmitter, EventSender};
use rpmkit_platform::{PlatformContext, ProcessOperations, TokioProcessOperations};
use rpmkit_types::Target;
use std::sync::Arc;

/// Everything an operation needs: configuration, resolved paths, the
/// process runner and the event channel
pub struct OpsCtx {
    pub config: Config,
    /// Resolved once per invocation
    pub paths: ResolvedPaths,
    pub process: Arc<dyn ProcessOperations>,
    pub tx: Option<EventSender>,
}

impl OpsCtx {
    /// Platform context whose events are tagged with `target`
    #[must_use]
    pub fn platform_context(&self, target: Target) -> PlatformContext {
        PlatformContext::new(self.tx.clone()).with_correlation_id(target.to_string())
    }
}

impl EventEmitter for OpsCtx {
    fn event_sender(&self) -> Option<&EventSender> {
        self.tx.as_ref()
    }
}

/// Builder for [`OpsCtx`]
#[derive(Default)]
pub struct OpsContextBuilder {
    config: Option<Config>,
    paths: Option<ResolvedPaths>,
    process: Option<Arc<dyn ProcessOperations>>,
    tx: Option<EventSender>,
}

impl OpsContextBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Use these paths instead of resolving them from the configuration
    #[must_use]
    pub fn with_paths(mut self, paths: ResolvedPaths) -> Self {
        self.paths = Some(paths);
        self
    }

    #[must_use]
    pub fn with_process(mut self, process: Arc<dyn ProcessOperations>) -> Self {
        self.process = Some(process);
        self
    }

    #[must_use]
    pub fn with_event_sender(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    /// Build the context
    ///
    /// Missing pieces fall back to the default configuration, paths resolved
    /// from it, and the tokio process runner.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the paths cannot
    /// be resolved.
    pub fn build(self) -> Result<OpsCtx, Error> {
        let config = self.config.unwrap_or_default();
        config.validate()?;
        let paths = match self.paths {
            Some(paths) => paths,
            None => config.resolve_paths()?,
        };
        let process = self
            .process
            .unwrap_or_else(|| Arc::new(TokioProcessOperations::new()));

        Ok(OpsCtx {
            config,
            paths,
            process,
            tx: self.tx,
        })
    }
}
