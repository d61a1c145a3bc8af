//! Scope-bound release actions.

use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{debug, warn};

use crate::errors::{TeardownError, TeardownFailure};

/// A release action bound to a guard.
pub type ReleaseAction = Box<dyn FnOnce() -> Result<(), TeardownError>>;

/// Runs a labelled release action exactly once when the guard goes out of
/// scope.
///
/// The action runs on every exit path: normal return, early return, or an
/// unwinding panic. Failures of the action itself (returned errors and
/// panics) are logged and swallowed; they never escape the guard.
///
/// Guards declared in the same scope are dropped in reverse declaration
/// order, which gives last-acquired, first-released teardown for free.
pub struct ScopeGuard {
    label: String,
    action: Option<ReleaseAction>,
}

impl ScopeGuard {
    /// Creates a guard around a fallible release action.
    pub fn new<F>(label: impl Into<String>, action: F) -> Self
    where
        F: FnOnce() -> Result<(), TeardownError> + 'static,
    {
        Self {
            label: label.into(),
            action: Some(Box::new(action)),
        }
    }

    /// Creates a guard around a release action that cannot report failure.
    pub fn infallible<F>(label: impl Into<String>, action: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self::new(label, move || {
            action();
            Ok(())
        })
    }

    /// Creates a guard with no action. Firing it only logs.
    pub fn noop(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: None,
        }
    }

    /// Returns the guard's label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns true while an action is still pending.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.action.is_some()
    }

    /// Disarms the guard, preventing the action from running.
    pub fn disarm(&mut self) {
        self.action = None;
    }

    /// Runs the action now instead of at scope exit.
    ///
    /// Consumes the guard so the action cannot run twice.
    pub fn fire(mut self) -> Result<(), TeardownFailure> {
        self.run()
    }

    fn run(&mut self) -> Result<(), TeardownFailure> {
        let Some(action) = self.action.take() else {
            debug!(label = %self.label, "guard released (no action)");
            return Ok(());
        };

        let message = match catch_unwind(AssertUnwindSafe(action)) {
            Ok(Ok(())) => {
                debug!(label = %self.label, "guard released");
                return Ok(());
            }
            Ok(Err(err)) => err.message,
            Err(panic) => format!("release action panicked: {}", panic_message(&*panic)),
        };

        warn!(label = %self.label, error = %message, "guard release failed");
        Err(TeardownFailure {
            label: self.label.clone(),
            message,
        })
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        // Failures are already logged by `run`.
        let _ = self.run();
    }
}

impl fmt::Debug for ScopeGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeGuard")
            .field("label", &self.label)
            .field("armed", &self.is_armed())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "<non-string panic payload>".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_guard_runs_on_scope_exit() {
        let count = Arc::new(AtomicUsize::new(0));
        {
            let count = count.clone();
            let _guard = ScopeGuard::infallible("count", move || {
                count.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_guard_runs_on_early_return() {
        fn early(count: Arc<AtomicUsize>, bail: bool) -> u32 {
            let _guard = ScopeGuard::infallible("early", move || {
                count.fetch_add(1, Ordering::SeqCst);
            });
            if bail {
                return 1;
            }
            2
        }

        let count = Arc::new(AtomicUsize::new(0));
        assert_eq!(early(count.clone(), true), 1);
        assert_eq!(early(count.clone(), false), 2);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_guard_runs_during_unwind() {
        let count = Arc::new(AtomicUsize::new(0));
        let inner = count.clone();
        let result = catch_unwind(AssertUnwindSafe(move || {
            let _guard = ScopeGuard::infallible("unwind", move || {
                inner.fetch_add(1, Ordering::SeqCst);
            });
            panic!("loop blew up");
        }));
        assert!(result.is_err());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_nested_guards_fire_in_reverse() {
        let order = Arc::new(Mutex::new(Vec::new()));
        {
            let o1 = order.clone();
            let _first = ScopeGuard::infallible("first", move || o1.lock().push("first"));
            let o2 = order.clone();
            let _second = ScopeGuard::infallible("second", move || o2.lock().push("second"));
            let o3 = order.clone();
            let _third = ScopeGuard::infallible("third", move || o3.lock().push("third"));
        }
        assert_eq!(*order.lock(), vec!["third", "second", "first"]);
    }

    #[test]
    fn test_fire_runs_exactly_once() {
        let count = Arc::new(AtomicUsize::new(0));
        let inner = count.clone();
        let guard = ScopeGuard::infallible("once", move || {
            inner.fetch_add(1, Ordering::SeqCst);
        });
        assert!(guard.fire().is_ok());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_disarm() {
        let count = Arc::new(AtomicUsize::new(0));
        {
            let inner = count.clone();
            let mut guard = ScopeGuard::infallible("disarmed", move || {
                inner.fetch_add(1, Ordering::SeqCst);
            });
            assert!(guard.is_armed());
            guard.disarm();
            assert!(!guard.is_armed());
        }
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_noop_guard() {
        let guard = ScopeGuard::noop("nothing");
        assert!(!guard.is_armed());
        assert_eq!(guard.label(), "nothing");
        assert!(guard.fire().is_ok());
    }

    #[test]
    fn test_failed_release_is_reported_not_propagated() {
        let guard = ScopeGuard::new("busy", || Err(TeardownError::new("still in use")));
        let failure = guard.fire().unwrap_err();
        assert_eq!(failure.label, "busy");
        assert_eq!(failure.message, "still in use");
    }

    #[test]
    fn test_panicking_release_is_caught() {
        let guard = ScopeGuard::infallible("panics", || panic!("Intentional"));
        let failure = guard.fire().unwrap_err();
        assert!(failure.message.contains("Intentional"));

        // Dropping a panicking guard must not unwind either.
        {
            let _guard = ScopeGuard::infallible("panics-on-drop", || panic!("Intentional"));
        }
    }
}
