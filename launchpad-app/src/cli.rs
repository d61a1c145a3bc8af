//! Command-line arguments, parsed once in `main` and passed by reference.

use clap::Parser;
use launchpad::config::{LaunchConfig, LogFormat};
use launchpad::platform::HeadlessFault;
use std::path::PathBuf;

/// Launchpad desktop bootstrap.
#[derive(Parser, Debug)]
#[command(name = "launchpad", version, about = "Bring up desktop subsystems, run the frame loop, tear down")]
pub struct Cli {
    /// JSON configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Stop the frame loop after this many frames
    #[arg(long, default_value_t = 60)]
    pub frames: u64,

    /// Do not show failure notifications
    #[arg(long)]
    pub no_notify: bool,

    /// Make one bring-up stage fail (transport, window-system, window, graphics)
    #[arg(long, value_name = "STAGE")]
    pub fail_stage: Option<HeadlessFault>,

    /// Make the frame loop fail with this message
    #[arg(long, value_name = "MESSAGE")]
    pub fail_loop: Option<String>,

    /// Frame at which --fail-loop triggers
    #[arg(long, value_name = "FRAME", default_value_t = 0, requires = "fail_loop")]
    pub fail_at_frame: u64,

    /// Log output format (text or json)
    #[arg(long, value_name = "FORMAT", value_parser = parse_log_format)]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Applies flags on top of file and environment configuration.
    pub fn apply(&self, config: &mut LaunchConfig) {
        if self.no_notify {
            config.notify_on_error = false;
        }
        if let Some(format) = self.log_format {
            config.log.format = format;
        }
    }
}

fn parse_log_format(value: &str) -> Result<LogFormat, String> {
    LogFormat::parse(value).ok_or_else(|| format!("expected 'text' or 'json', got '{value}'"))
}
