//! Loop outcomes and the terminal result of a run.

use serde::{Deserialize, Serialize};

use crate::errors::FailureKind;

/// How the caller-supplied loop ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum LoopOutcome {
    /// The loop returned without a failure.
    Clean,
    /// The loop returned a failure message after full startup.
    Failed(String),
}

impl LoopOutcome {
    /// Builds an outcome from the loop's optional failure message.
    #[must_use]
    pub fn from_message(message: Option<String>) -> Self {
        message.map_or(Self::Clean, Self::Failed)
    }

    /// Returns the failure message, if any.
    #[must_use]
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Self::Clean => None,
            Self::Failed(message) => Some(message),
        }
    }

    /// Returns true if the loop failed.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Terminal state of one run: which stage failed, or how the loop failed.
///
/// At most one field is populated. Both are empty on full success, including
/// when the loop ran and returned cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    terminal_kind: Option<FailureKind>,
    loop_outcome: Option<LoopOutcome>,
}

impl RunResult {
    /// Every stage succeeded and the loop (if any) returned cleanly.
    #[must_use]
    pub fn success() -> Self {
        Self::default()
    }

    /// A stage failed; the loop never ran.
    #[must_use]
    pub fn staging_failed(kind: FailureKind) -> Self {
        Self {
            terminal_kind: Some(kind),
            loop_outcome: None,
        }
    }

    /// The loop finished after full startup.
    ///
    /// A clean outcome collapses into [`RunResult::success`].
    #[must_use]
    pub fn from_loop(outcome: LoopOutcome) -> Self {
        match outcome {
            LoopOutcome::Clean => Self::success(),
            failed @ LoopOutcome::Failed(_) => Self {
                terminal_kind: None,
                loop_outcome: Some(failed),
            },
        }
    }

    /// The stage failure, if a stage failed.
    #[must_use]
    pub fn terminal_kind(&self) -> Option<FailureKind> {
        self.terminal_kind
    }

    /// The loop failure, if the loop failed.
    #[must_use]
    pub fn loop_outcome(&self) -> Option<&LoopOutcome> {
        self.loop_outcome.as_ref()
    }

    /// The loop's failure message, if the loop failed.
    #[must_use]
    pub fn runtime_failure(&self) -> Option<&str> {
        self.loop_outcome.as_ref().and_then(LoopOutcome::failure_message)
    }

    /// Returns true on full success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.terminal_kind.is_none() && self.loop_outcome.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_outcome_from_message() {
        assert_eq!(LoopOutcome::from_message(None), LoopOutcome::Clean);
        let failed = LoopOutcome::from_message(Some("disk full".to_string()));
        assert!(failed.is_failure());
        assert_eq!(failed.failure_message(), Some("disk full"));
    }

    #[test]
    fn test_clean_loop_is_success() {
        let result = RunResult::from_loop(LoopOutcome::Clean);
        assert!(result.is_success());
        assert_eq!(result, RunResult::success());
        assert!(result.loop_outcome().is_none());
    }

    #[test]
    fn test_failed_loop_populates_only_loop_outcome() {
        let result = RunResult::from_loop(LoopOutcome::Failed("boom".to_string()));
        assert!(!result.is_success());
        assert!(result.terminal_kind().is_none());
        assert_eq!(result.runtime_failure(), Some("boom"));
    }

    #[test]
    fn test_staging_failed_populates_only_kind() {
        let result = RunResult::staging_failed(FailureKind::WindowCreateFailed);
        assert_eq!(result.terminal_kind(), Some(FailureKind::WindowCreateFailed));
        assert!(result.loop_outcome().is_none());
        assert!(result.runtime_failure().is_none());
    }

    #[test]
    fn test_loop_outcome_serialize() {
        let json = serde_json::to_value(LoopOutcome::Failed("x".to_string())).unwrap();
        assert_eq!(json, serde_json::json!({"status": "failed", "message": "x"}));
    }
}
