//! Orchestrator lifecycle states.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The state of one orchestrated run.
///
/// ```text
/// NotStarted -> Staging -> StagingFailed ----------------> TornDown
///                       -> Running -> RunningFailed -----> TornDown
///                                  -> Completed ---------> TornDown
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    /// Nothing has been acquired yet.
    #[default]
    NotStarted,
    /// Stages are being acquired in order.
    Staging,
    /// A stage failed; the loop will not run.
    StagingFailed,
    /// Every stage succeeded and the loop is running.
    Running,
    /// The loop returned a failure message.
    RunningFailed,
    /// The loop returned cleanly.
    Completed,
    /// All guards have fired.
    TornDown,
}

impl LifecycleState {
    /// Returns true if `next` is a legal successor of this state.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        match (self, next) {
            (Self::NotStarted, Self::Staging)
            | (Self::Staging, Self::StagingFailed | Self::Running)
            | (Self::Running, Self::RunningFailed | Self::Completed) => true,
            (Self::NotStarted | Self::TornDown, _) => false,
            (_, Self::TornDown) => true,
            _ => false,
        }
    }

    /// Returns true once teardown has happened.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::TornDown)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not_started"),
            Self::Staging => write!(f, "staging"),
            Self::StagingFailed => write!(f, "staging_failed"),
            Self::Running => write!(f, "running"),
            Self::RunningFailed => write!(f, "running_failed"),
            Self::Completed => write!(f, "completed"),
            Self::TornDown => write!(f, "torn_down"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        use LifecycleState::*;
        let path = [NotStarted, Staging, Running, Completed, TornDown];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_torn_down_reachable_from_every_non_initial_state() {
        use LifecycleState::*;
        for state in [Staging, StagingFailed, Running, RunningFailed, Completed] {
            assert!(state.can_transition_to(TornDown), "{state}");
        }
        assert!(!NotStarted.can_transition_to(TornDown));
    }

    #[test]
    fn test_illegal_transitions() {
        use LifecycleState::*;
        assert!(!NotStarted.can_transition_to(Running));
        assert!(!StagingFailed.can_transition_to(Running));
        assert!(!Completed.can_transition_to(Staging));
        assert!(!TornDown.can_transition_to(Staging));
        assert!(!TornDown.can_transition_to(TornDown));
    }

    #[test]
    fn test_is_terminal() {
        assert!(LifecycleState::TornDown.is_terminal());
        assert!(!LifecycleState::Completed.is_terminal());
    }

    #[test]
    fn test_state_serialize() {
        let json = serde_json::to_string(&LifecycleState::StagingFailed).unwrap();
        assert_eq!(json, r#""staging_failed""#);
        assert_eq!(LifecycleState::default(), LifecycleState::NotStarted);
    }
}
