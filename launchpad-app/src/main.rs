//! # Launchpad
//!
//! Desktop bootstrap binary: brings up the transport, windowing and graphics
//! subsystems, runs the frame loop, tears everything down in reverse order
//! and exits with the code of whatever stopped it.
//!
//! ## Usage
//!
//! ```bash
//! # Run 120 frames with the default configuration
//! launchpad --frames 120
//!
//! # Simulate a window system failure (exit code 2)
//! launchpad --fail-stage window-system
//!
//! # Simulate a runtime failure on frame 10
//! launchpad --fail-loop "disk full" --fail-at-frame 10
//! ```

mod cli;

use anyhow::Context;
use clap::Parser;
use launchpad::config::{LaunchConfig, LogConfig};
use launchpad::events::NotificationSink;
use launchpad::launcher::Launcher;
use launchpad::observability::init_logging;
use launchpad::platform::{desktop_stages, run_frames, HeadlessPlatform};
use launchpad::resources::{report_resource, EmbeddedResources};
use std::sync::Arc;

/// Exit code when configuration cannot be loaded (EX_CONFIG).
const CONFIG_ERROR_EXIT: i32 = 78;

const DATA_RESOURCE_ID: u32 = 101;
const DATA_RESOURCE_KIND: &str = "DATA";

fn main() {
    let cli = cli::Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            init_logging(&LogConfig::default());
            tracing::error!("{err:#}");
            std::process::exit(CONFIG_ERROR_EXIT);
        }
    };
    init_logging(&config.log);

    let resources = EmbeddedResources::new().with(
        DATA_RESOURCE_ID,
        DATA_RESOURCE_KIND,
        include_bytes!("../resources/data.bin").to_vec(),
    );
    report_resource(&resources, DATA_RESOURCE_ID, DATA_RESOURCE_KIND);

    let platform = HeadlessPlatform::new(cli.fail_stage, None);
    let (stages, session) = desktop_stages(
        platform.transport.clone(),
        platform.windows.clone(),
        platform.graphics.clone(),
        &config.window,
    );

    let fail_loop = cli.fail_loop.clone();
    let fail_at_frame = cli.fail_at_frame;
    let main_loop = || {
        run_frames(&session, Some(cli.frames), |frame| match &fail_loop {
            Some(message) if frame >= fail_at_frame => Err(message.clone()),
            _ => Ok(()),
        })
    };

    let launcher = Launcher::from_config(&config).with_notifier(notifier());
    let report = launcher.run(stages, Some(main_loop));

    tracing::info!(
        run_id = %report.run_id,
        exit_code = report.exit_code,
        duration_ms = report.duration_ms(),
        "{}",
        config.exit_codes().describe(report.exit_code)
    );
    std::process::exit(report.exit_code);
}

fn load_config(cli: &cli::Cli) -> anyhow::Result<LaunchConfig> {
    let mut config = match &cli.config {
        Some(path) => LaunchConfig::from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => LaunchConfig::default(),
    };
    config
        .apply_env()
        .context("applying environment overrides")?;
    cli.apply(&mut config);
    config.validate().context("validating configuration")?;
    Ok(config)
}

#[cfg(feature = "native-dialog")]
fn notifier() -> Arc<dyn NotificationSink> {
    Arc::new(launchpad::events::DialogNotificationSink)
}

#[cfg(not(feature = "native-dialog"))]
fn notifier() -> Arc<dyn NotificationSink> {
    Arc::new(launchpad::events::LoggingNotificationSink)
}
