//! Maps a run result to the user-facing notification.

use serde::{Deserialize, Serialize};

use crate::core::RunResult;

/// Title used when the loop failed after full startup.
pub const RUNTIME_ERROR_TITLE: &str = "Runtime Error";

/// Title used when a stage failed.
pub const INITIALIZATION_ERROR_TITLE: &str = "Initialization Error";

const RUNTIME_PREAMBLE: &str = "This program encountered an error while it was running:";
const STARTUP_PREAMBLE: &str = "This program encountered an error and was unable to start:";

/// A composed notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Dialog title.
    pub title: String,
    /// Dialog body.
    pub body: String,
}

/// Composes the notification for a run result.
///
/// A loop failure wins over a stage failure (the two cannot co-occur in a
/// well-formed result). Full success yields no notification. Whether the
/// notification is actually shown is the caller's decision.
#[must_use]
pub fn classify(result: &RunResult) -> Option<Notification> {
    if let Some(message) = result.runtime_failure() {
        return Some(Notification {
            title: RUNTIME_ERROR_TITLE.to_string(),
            body: format!("{RUNTIME_PREAMBLE}\n\n{message}"),
        });
    }

    result.terminal_kind().map(|kind| Notification {
        title: INITIALIZATION_ERROR_TITLE.to_string(),
        body: format!("{STARTUP_PREAMBLE}\n\n{}", kind.sentence()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LoopOutcome;
    use crate::errors::FailureKind;

    #[test]
    fn test_success_has_no_notification() {
        assert!(classify(&RunResult::success()).is_none());
    }

    #[test]
    fn test_runtime_failure() {
        let result = RunResult::from_loop(LoopOutcome::Failed("disk full".to_string()));
        let notification = classify(&result).unwrap();
        assert_eq!(notification.title, "Runtime Error");
        assert_eq!(
            notification.body,
            "This program encountered an error while it was running:\n\ndisk full"
        );
    }

    #[test]
    fn test_every_stage_failure_has_its_sentence() {
        for kind in FailureKind::ALL {
            let notification = classify(&RunResult::staging_failed(kind)).unwrap();
            assert_eq!(notification.title, "Initialization Error");
            assert!(notification.body.starts_with(STARTUP_PREAMBLE));
            assert!(notification.body.ends_with(kind.sentence()));
        }
    }

    #[test]
    fn test_window_system_sentence() {
        let notification =
            classify(&RunResult::staging_failed(FailureKind::WindowSystemInitFailed)).unwrap();
        assert_eq!(
            notification.body,
            "This program encountered an error and was unable to start:\n\n\
             Unable to initialize the windowing library."
        );
    }
}
