//! Ordered guard list with LIFO teardown.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::guard::ScopeGuard;
use crate::errors::TeardownFailure;

/// Outcome of tearing down a [`GuardStack`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeardownReport {
    /// Labels of every guard fired, in firing order.
    pub released: Vec<String>,
    /// Guards whose action failed or panicked.
    pub failures: Vec<TeardownFailure>,
}

impl TeardownReport {
    /// Returns true if every release action completed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Guards registered by successfully acquired stages.
///
/// Guards are appended in acquisition order and fired in reverse. Teardown
/// is total: a failing release never stops the remaining ones. Dropping a
/// stack that was not torn down explicitly tears it down.
#[derive(Default)]
pub struct GuardStack {
    guards: Vec<ScopeGuard>,
}

impl GuardStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a guard on top of the stack.
    pub fn push(&mut self, guard: ScopeGuard) {
        debug!(label = %guard.label(), depth = self.guards.len() + 1, "guard registered");
        self.guards.push(guard);
    }

    /// Returns the number of pending guards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.guards.len()
    }

    /// Returns true if no guards are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    /// Labels of the pending guards, in registration order.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.guards.iter().map(ScopeGuard::label).collect()
    }

    /// Fires every pending guard, last registered first.
    ///
    /// The stack is empty afterwards; calling this again is a no-op.
    pub fn teardown(&mut self) -> TeardownReport {
        let mut report = TeardownReport::default();

        while let Some(guard) = self.guards.pop() {
            let label = guard.label().to_string();
            if let Err(failure) = guard.fire() {
                report.failures.push(failure);
            }
            report.released.push(label);
        }

        report
    }
}

impl Drop for GuardStack {
    fn drop(&mut self) {
        // Vec drops front to back, so unwind by hand.
        self.teardown();
    }
}

impl fmt::Debug for GuardStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardStack")
            .field("labels", &self.labels())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TeardownError;
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn recording(order: &Arc<Mutex<Vec<u32>>>, id: u32) -> ScopeGuard {
        let order = order.clone();
        ScopeGuard::infallible(format!("guard-{id}"), move || order.lock().push(id))
    }

    #[test]
    fn test_stack_creation() {
        let stack = GuardStack::new();
        assert!(stack.is_empty());
        assert_eq!(stack.len(), 0);
    }

    #[test]
    fn test_stack_lifo_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut stack = GuardStack::new();
        stack.push(recording(&order, 1));
        stack.push(recording(&order, 2));
        stack.push(recording(&order, 3));
        assert_eq!(stack.labels(), vec!["guard-1", "guard-2", "guard-3"]);

        let report = stack.teardown();

        assert_eq!(*order.lock(), vec![3, 2, 1]);
        assert_eq!(report.released, vec!["guard-3", "guard-2", "guard-1"]);
        assert!(report.is_clean());
    }

    #[test]
    fn test_stack_clears_after_teardown() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut stack = GuardStack::new();
        stack.push(recording(&order, 1));

        stack.teardown();
        assert!(stack.is_empty());

        let second = stack.teardown();
        assert!(second.released.is_empty());
        assert_eq!(*order.lock(), vec![1]);
    }

    #[test]
    fn test_drop_unwinds_in_reverse() {
        let order = Arc::new(Mutex::new(Vec::new()));
        {
            let mut stack = GuardStack::new();
            stack.push(recording(&order, 1));
            stack.push(recording(&order, 2));
        }
        assert_eq!(*order.lock(), vec![2, 1]);
    }

    #[test]
    fn test_teardown_continues_on_failure() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut stack = GuardStack::new();
        stack.push(recording(&order, 1));
        stack.push(ScopeGuard::infallible("panics", || panic!("Intentional")));
        stack.push(ScopeGuard::new("errors", || Err(TeardownError::new("refused"))));
        stack.push(recording(&order, 4));

        let report = stack.teardown();

        assert_eq!(*order.lock(), vec![4, 1]);
        assert_eq!(report.released, vec!["guard-4", "errors", "panics", "guard-1"]);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0].label, "errors");
        assert_eq!(report.failures[1].label, "panics");
    }
}
