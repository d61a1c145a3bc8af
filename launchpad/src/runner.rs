//! Runs the caller-supplied main loop once.

use tracing::{debug, info};

/// Invokes `main_loop` exactly once, synchronously.
///
/// Returns the loop's failure message, or `None` if the loop returned
/// cleanly or no loop was supplied. The loop is never retried, and panics
/// are not caught here: they unwind through the caller, whose guards still
/// release on the way out.
pub fn run_loop<L>(main_loop: Option<L>) -> Option<String>
where
    L: FnOnce() -> Option<String>,
{
    let Some(main_loop) = main_loop else {
        debug!("no main loop supplied");
        return None;
    };

    info!("main loop started");
    let failure = main_loop();
    match &failure {
        Some(message) => info!(error = %message, "main loop returned a failure"),
        None => info!("main loop finished"),
    }
    failure
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_absent_loop_yields_none() {
        assert_eq!(run_loop(None::<fn() -> Option<String>>), None);
    }

    #[test]
    fn test_loop_runs_exactly_once() {
        let calls = Cell::new(0);
        let result = run_loop(Some(|| {
            calls.set(calls.get() + 1);
            None
        }));
        assert_eq!(result, None);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_loop_failure_is_returned_verbatim() {
        let result = run_loop(Some(|| Some("disk full".to_string())));
        assert_eq!(result.as_deref(), Some("disk full"));
    }

    #[test]
    #[should_panic(expected = "programming error")]
    fn test_loop_panic_propagates() {
        run_loop(Some(|| -> Option<String> { panic!("programming error") }));
    }
}
