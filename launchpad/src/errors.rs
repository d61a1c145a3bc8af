//! Error types for the launchpad orchestrator.
//!
//! Two failure categories reach the user: a [`FailureKind`] when one of the
//! ordered acquisition stages fails, and a free-text runtime failure returned
//! by the main loop (see [`crate::core::LoopOutcome`]). Everything else in
//! this module is plumbing for collaborators and configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Sentence used when a failure cannot be attributed to any known stage.
pub const INTERNAL_ERROR_SENTENCE: &str = "Someone made a programming mistake.";

/// Closed set of stage failure reasons, one per acquisition stage.
///
/// The `Display` output is [`FailureKind::sentence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The network transport library could not be initialized.
    TransportInitFailed,

    /// The windowing/input library could not be initialized.
    WindowSystemInitFailed,

    /// The main window could not be created.
    WindowCreateFailed,

    /// The GPU rendering context could not be bound.
    GraphicsContextInitFailed,
}

impl FailureKind {
    /// All variants in declared stage order.
    pub const ALL: [Self; 4] = [
        Self::TransportInitFailed,
        Self::WindowSystemInitFailed,
        Self::WindowCreateFailed,
        Self::GraphicsContextInitFailed,
    ];

    /// Returns the fixed diagnostic sentence for this failure.
    #[must_use]
    pub const fn sentence(self) -> &'static str {
        match self {
            Self::TransportInitFailed => "Unable to initialize the network transport library.",
            Self::WindowSystemInitFailed => "Unable to initialize the windowing library.",
            Self::WindowCreateFailed => "Unable to create the application window.",
            Self::GraphicsContextInitFailed => "Unable to initialize the graphics context.",
        }
    }

    /// Returns a short machine-friendly identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TransportInitFailed => "transport_init_failed",
            Self::WindowSystemInitFailed => "window_system_init_failed",
            Self::WindowCreateFailed => "window_create_failed",
            Self::GraphicsContextInitFailed => "graphics_context_init_failed",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sentence())
    }
}

/// Detail reported by a stage's acquisition closure when it fails.
///
/// The stage itself decides which [`FailureKind`] the failure maps to; the
/// detail only goes to the log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{detail}")]
pub struct AcquireError {
    /// Human-readable detail.
    pub detail: String,
}

impl AcquireError {
    /// Creates a new acquisition error.
    #[must_use]
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Failure reported by a release action during teardown.
///
/// Never propagated: teardown logs it and carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TeardownError {
    /// Human-readable message.
    pub message: String,
}

impl TeardownError {
    /// Creates a new teardown error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A release action that failed, as recorded in a run report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeardownFailure {
    /// Label of the guard whose action failed.
    pub label: String,
    /// What went wrong.
    pub message: String,
}

impl fmt::Display for TeardownFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.message)
    }
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file '{path}': {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid JSON for the expected shape.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of range or inconsistent.
    #[error("invalid config: {0}")]
    Invalid(String),
}
