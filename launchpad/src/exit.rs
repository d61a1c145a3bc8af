//! Maps the terminal state of a run to a process exit code.

use serde::{Deserialize, Serialize};

use crate::core::RunResult;
use crate::errors::{FailureKind, INTERNAL_ERROR_SENTENCE};

/// Exit code for a run that completed, or (by default) failed only at runtime.
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for a stage failure.
///
/// Codes are fixed per stage and start at 1 so that no stage shares a code
/// with success. Do not renumber: scripts match on them.
#[must_use]
pub const fn stage_exit_code(kind: FailureKind) -> i32 {
    match kind {
        FailureKind::TransportInitFailed => 1,
        FailureKind::WindowSystemInitFailed => 2,
        FailureKind::WindowCreateFailed => 3,
        FailureKind::GraphicsContextInitFailed => 4,
    }
}

/// Converts a [`RunResult`] into an exit code.
///
/// A runtime failure after full startup exits with [`EXIT_SUCCESS`] unless a
/// dedicated code is configured with
/// [`ExitCodeMapper::with_runtime_failure_code`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitCodeMapper {
    runtime_failure_code: Option<i32>,
}

impl ExitCodeMapper {
    /// Creates a mapper with the compatible runtime-failure behavior.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports runtime failures with `code` instead of success.
    #[must_use]
    pub fn with_runtime_failure_code(mut self, code: i32) -> Self {
        self.runtime_failure_code = Some(code);
        self
    }

    /// The configured runtime-failure code, if any.
    #[must_use]
    pub fn runtime_failure_code(&self) -> Option<i32> {
        self.runtime_failure_code
    }

    /// Returns the exit code for a run result.
    #[must_use]
    pub fn exit_code(&self, result: &RunResult) -> i32 {
        if let Some(kind) = result.terminal_kind() {
            return stage_exit_code(kind);
        }
        if result.runtime_failure().is_some() {
            return self.runtime_failure_code.unwrap_or(EXIT_SUCCESS);
        }
        EXIT_SUCCESS
    }

    /// Describes an exit code for diagnostics.
    #[must_use]
    pub fn describe(&self, code: i32) -> &'static str {
        if code == EXIT_SUCCESS {
            return "Completed.";
        }
        if self.runtime_failure_code == Some(code) {
            return "Failed while running.";
        }
        FailureKind::ALL
            .into_iter()
            .find(|kind| stage_exit_code(*kind) == code)
            .map_or(INTERNAL_ERROR_SENTENCE, FailureKind::sentence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LoopOutcome;
    use std::collections::HashSet;

    #[test]
    fn test_success_is_zero() {
        assert_eq!(ExitCodeMapper::new().exit_code(&RunResult::success()), 0);
    }

    #[test]
    fn test_stage_codes_are_fixed() {
        let mapper = ExitCodeMapper::new();
        let codes: Vec<i32> = FailureKind::ALL
            .iter()
            .map(|kind| mapper.exit_code(&RunResult::staging_failed(*kind)))
            .collect();
        assert_eq!(codes, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_stage_codes_are_distinct_and_nonzero() {
        let codes: HashSet<i32> = FailureKind::ALL.iter().map(|k| stage_exit_code(*k)).collect();
        assert_eq!(codes.len(), FailureKind::ALL.len());
        assert!(!codes.contains(&EXIT_SUCCESS));
    }

    #[test]
    fn test_runtime_failure_is_zero_by_default() {
        let result = RunResult::from_loop(LoopOutcome::Failed("disk full".to_string()));
        assert_eq!(ExitCodeMapper::new().exit_code(&result), 0);
    }

    #[test]
    fn test_runtime_failure_code_opt_in() {
        let result = RunResult::from_loop(LoopOutcome::Failed("disk full".to_string()));
        let mapper = ExitCodeMapper::new().with_runtime_failure_code(70);
        assert_eq!(mapper.exit_code(&result), 70);
        assert_eq!(mapper.exit_code(&RunResult::success()), 0);
        assert_eq!(mapper.describe(70), "Failed while running.");
    }

    #[test]
    fn test_describe() {
        let mapper = ExitCodeMapper::new();
        assert_eq!(mapper.describe(0), "Completed.");
        assert_eq!(mapper.describe(3), "Unable to create the application window.");
        assert_eq!(mapper.describe(99), INTERNAL_ERROR_SENTENCE);
    }
}
