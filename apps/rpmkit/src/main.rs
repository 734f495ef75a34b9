//! rpmkit - containerized RPM builds for a local yum repository
//!
//! This is the CLI front end. It resolves configuration, runs the requested
//! targets through the ops crate and exits with the status of the first
//! failing step.

mod cli;
mod display;
mod error;
mod events;
mod logging;

use crate::cli::{Cli, GlobalArgs};
use crate::display::OutputRenderer;
use crate::error::CliError;
use crate::events::EventHandler;
use clap::Parser;
use rpmkit_config::Config;
use rpmkit_events::EventReceiver;
use rpmkit_ops::{OperationResult, OpsContextBuilder, OpsCtx};
use rpmkit_types::{ColorChoice, Target};
use std::process;
use tokio::select;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_mode = cli.global.json;

    init_tracing(json_mode, cli.global.debug);

    if let Err(e) = run(cli).await {
        let code = e.exit_code();
        error!(exit_code = code, "{e}");
        if json_mode {
            let report = serde_json::json!({ "error": e.failure(), "exit_code": code });
            println!("{report}");
        } else {
            eprintln!("Error: {e}");
        }
        process::exit(code);
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    info!("Starting rpmkit v{}", env!("CARGO_PKG_VERSION"));

    // 1. file config (or defaults)
    let mut config = Config::load_or_default(cli.global.config.as_deref()).await?;
    // 2. environment
    config.merge_env()?;
    // 3. CLI flags
    apply_cli_config(&mut config, &cli.global);

    let (event_sender, event_receiver) = rpmkit_events::channel();
    let color = config.general.color;
    let ops_ctx = OpsContextBuilder::new()
        .with_config(config)
        .with_event_sender(event_sender)
        .build()?;
    info!(
        dist = %ops_ctx.paths.dist_dir.display(),
        repository = %ops_ctx.paths.repository_dir.display(),
        "resolved paths"
    );

    let renderer = OutputRenderer::new(cli.global.json, color);
    let colors_enabled = match color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => console::Term::stderr().features().colors_supported(),
    };
    let mut event_handler = EventHandler::new(colors_enabled, cli.global.json);

    let result =
        execute_targets_with_events(&cli.targets, ops_ctx, event_receiver, &mut event_handler)
            .await?;

    renderer.render_result(&result)?;
    info!("All targets completed");
    Ok(())
}

/// Run the targets while draining events concurrently
async fn execute_targets_with_events(
    targets: &[Target],
    ops_ctx: OpsCtx,
    mut event_receiver: EventReceiver,
    event_handler: &mut EventHandler,
) -> Result<OperationResult, CliError> {
    let mut run_future = Box::pin(async move {
        let reports = rpmkit_ops::run_targets(&ops_ctx, targets).await?;
        Ok::<_, CliError>(OperationResult::Targets(reports))
    });

    loop {
        select! {
            result = &mut run_future => {
                while let Ok(message) = event_receiver.try_recv() {
                    event_handler.handle_event(&message);
                }
                return result;
            }

            message = event_receiver.recv() => {
                if let Some(message) = message {
                    event_handler.handle_event(&message);
                }
            }
        }
    }
}

/// Apply CLI configuration overrides (highest precedence)
fn apply_cli_config(config: &mut Config, global: &GlobalArgs) {
    if let Some(color) = global.color {
        config.general.color = color;
    }
    if let Some(base_dir) = &global.base_dir {
        config.paths.base_dir = Some(base_dir.clone());
    }
}

/// Initialize tracing/logging
///
/// Logs always go to stderr so stdout carries only the final report.
fn init_tracing(json_mode: bool, debug_enabled: bool) {
    let default_filter = if debug_enabled {
        "info,rpmkit=debug,rpmkit_ops=debug,rpmkit_platform=debug,rpmkit_config=debug"
    } else if json_mode {
        "info"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    if json_mode {
        tracing_subscriber::fmt()
            .json()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(debug_enabled)
            .with_env_filter(filter)
            .init();
    }
}
