//! Launch configuration.
//!
//! Loaded from a JSON file, with environment overrides applied on top.
//! Every field has a default, so an empty object is a valid config.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::{ConfigError, FailureKind};
use crate::exit::{stage_exit_code, ExitCodeMapper, EXIT_SUCCESS};

/// Environment variable toggling the failure notification (`0`/`1`, `false`/`true`).
pub const NOTIFY_ENV: &str = "LAUNCHPAD_NOTIFY";
/// Environment variable selecting the log format (`text` or `json`).
pub const LOG_FORMAT_ENV: &str = "LAUNCHPAD_LOG_FORMAT";
/// Environment variable holding the log filter directive.
pub const LOG_FILTER_ENV: &str = "LAUNCHPAD_LOG";

/// Top-level configuration for one launch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchConfig {
    /// Main window settings.
    #[serde(default)]
    pub window: WindowConfig,
    /// Whether failures are shown to the user.
    #[serde(default = "default_notify_on_error")]
    pub notify_on_error: bool,
    /// Exit code for a runtime failure; `None` exits with 0.
    #[serde(default)]
    pub runtime_failure_exit_code: Option<i32>,
    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

fn default_notify_on_error() -> bool {
    true
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            notify_on_error: default_notify_on_error(),
            runtime_failure_exit_code: None,
            log: LogConfig::default(),
        }
    }
}

impl LaunchConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Enables or disables the failure notification.
    #[must_use]
    pub fn with_notify_on_error(mut self, enabled: bool) -> Self {
        self.notify_on_error = enabled;
        self
    }

    /// Sets the runtime-failure exit code.
    #[must_use]
    pub fn with_runtime_failure_exit_code(mut self, code: i32) -> Self {
        self.runtime_failure_exit_code = Some(code);
        self
    }

    /// Sets the window settings.
    #[must_use]
    pub fn with_window(mut self, window: WindowConfig) -> Self {
        self.window = window;
        self
    }

    /// Applies overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary variable source.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(NOTIFY_ENV) {
            self.notify_on_error = parse_flag(NOTIFY_ENV, &value)?;
        }
        if let Some(value) = lookup(LOG_FORMAT_ENV) {
            self.log.format = LogFormat::parse(&value).ok_or_else(|| {
                ConfigError::Invalid(format!("{LOG_FORMAT_ENV} must be 'text' or 'json', got '{value}'"))
            })?;
        }
        if let Some(value) = lookup(LOG_FILTER_ENV) {
            self.log.filter = value;
        }
        Ok(())
    }

    /// Checks value ranges and code collisions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be nonzero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if let Some(code) = self.runtime_failure_exit_code {
            if code == EXIT_SUCCESS {
                return Err(ConfigError::Invalid(
                    "runtime_failure_exit_code must not be 0; omit it instead".to_string(),
                ));
            }
            if let Some(kind) = FailureKind::ALL.into_iter().find(|k| stage_exit_code(*k) == code) {
                return Err(ConfigError::Invalid(format!(
                    "runtime_failure_exit_code {code} collides with stage failure '{}'",
                    kind.as_str()
                )));
            }
        }
        Ok(())
    }

    /// Builds the exit code mapper for this configuration.
    #[must_use]
    pub fn exit_codes(&self) -> ExitCodeMapper {
        match self.runtime_failure_exit_code {
            Some(code) => ExitCodeMapper::new().with_runtime_failure_code(code),
            None => ExitCodeMapper::new(),
        }
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Invalid(format!("{key} must be a boolean, got '{other}'"))),
    }
}

/// Main window settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Width in screen coordinates.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Height in screen coordinates.
    #[serde(default = "default_height")]
    pub height: u32,
    /// Window title.
    #[serde(default = "default_title")]
    pub title: String,
    /// Whether the window is visible as soon as it is created.
    #[serde(default)]
    pub visible: bool,
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

fn default_title() -> String {
    "launchpad".to_string()
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            title: default_title(),
            visible: false,
        }
    }
}

impl WindowConfig {
    /// Sets the window size.
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// Parses `text` or `json`, case-insensitively.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            format: LogFormat::default(),
        }
    }
}
