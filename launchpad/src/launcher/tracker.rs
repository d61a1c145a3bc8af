//! Records lifecycle transitions of one run.

use tracing::{debug, error};

use crate::core::LifecycleState;

#[derive(Debug, Default)]
pub(crate) struct StateTracker {
    history: Vec<LifecycleState>,
}

impl StateTracker {
    pub(crate) fn new() -> Self {
        Self {
            history: vec![LifecycleState::NotStarted],
        }
    }

    pub(crate) fn current(&self) -> LifecycleState {
        self.history.last().copied().unwrap_or_default()
    }

    /// Moves to `next`; an illegal transition is logged and ignored.
    pub(crate) fn advance(&mut self, next: LifecycleState) -> bool {
        let current = self.current();
        if !current.can_transition_to(next) {
            error!(from = %current, to = %next, "illegal lifecycle transition");
            return false;
        }
        debug!(from = %current, to = %next, "lifecycle transition");
        self.history.push(next);
        true
    }

    pub(crate) fn into_history(self) -> Vec<LifecycleState> {
        self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_records_legal_path() {
        let mut tracker = StateTracker::new();
        assert!(tracker.advance(LifecycleState::Staging));
        assert!(tracker.advance(LifecycleState::StagingFailed));
        assert!(tracker.advance(LifecycleState::TornDown));
        assert_eq!(
            tracker.into_history(),
            vec![
                LifecycleState::NotStarted,
                LifecycleState::Staging,
                LifecycleState::StagingFailed,
                LifecycleState::TornDown,
            ]
        );
    }

    #[test]
    fn test_tracker_rejects_illegal_transition() {
        let mut tracker = StateTracker::new();
        assert!(!tracker.advance(LifecycleState::Running));
        assert_eq!(tracker.current(), LifecycleState::NotStarted);
    }
}
