//! Scripted stages that record what happened to them.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::errors::{AcquireError, FailureKind, TeardownError};
use crate::stages::Stage;

/// One recorded step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalEntry {
    /// The stage's acquire ran (successfully or not).
    Attempted(String),
    /// The stage's release ran.
    Released(String),
}

/// Shared, cloneable record of stage activity.
#[derive(Debug, Clone, Default)]
pub struct ReleaseJournal {
    entries: Arc<Mutex<Vec<JournalEntry>>>,
}

impl ReleaseJournal {
    /// Creates an empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries in order.
    #[must_use]
    pub fn entries(&self) -> Vec<JournalEntry> {
        self.entries.lock().clone()
    }

    /// Names of stages whose acquire ran, in order.
    #[must_use]
    pub fn attempted(&self) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .filter_map(|e| match e {
                JournalEntry::Attempted(name) => Some(name.clone()),
                JournalEntry::Released(_) => None,
            })
            .collect()
    }

    /// Names of stages whose release ran, in order.
    #[must_use]
    pub fn released(&self) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .filter_map(|e| match e {
                JournalEntry::Released(name) => Some(name.clone()),
                JournalEntry::Attempted(_) => None,
            })
            .collect()
    }

    fn record(&self, entry: JournalEntry) {
        self.entries.lock().push(entry);
    }
}

/// How a scripted stage's release behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReleaseBehavior {
    /// Release succeeds.
    #[default]
    Succeed,
    /// Release returns an error.
    Fail,
    /// Release panics.
    Panic,
}

/// Builder for a stage with a predetermined outcome.
#[derive(Debug, Clone)]
pub struct ScriptedStage {
    name: String,
    kind: FailureKind,
    acquire_ok: bool,
    release: ReleaseBehavior,
}

impl ScriptedStage {
    /// A stage that acquires successfully.
    #[must_use]
    pub fn ok(name: impl Into<String>, kind: FailureKind) -> Self {
        Self {
            name: name.into(),
            kind,
            acquire_ok: true,
            release: ReleaseBehavior::Succeed,
        }
    }

    /// A stage whose acquire fails.
    #[must_use]
    pub fn failing(name: impl Into<String>, kind: FailureKind) -> Self {
        Self {
            acquire_ok: false,
            ..Self::ok(name, kind)
        }
    }

    /// Sets the release behavior.
    #[must_use]
    pub fn with_release(mut self, release: ReleaseBehavior) -> Self {
        self.release = release;
        self
    }

    /// Builds the stage, recording into `journal`.
    #[must_use]
    pub fn build(self, journal: &ReleaseJournal) -> Stage {
        let Self {
            name,
            kind,
            acquire_ok,
            release,
        } = self;

        let acquire_journal = journal.clone();
        let acquire_name = name.clone();
        let release_journal = journal.clone();
        let release_name = name.clone();

        Stage::new(name, kind, move || {
            acquire_journal.record(JournalEntry::Attempted(acquire_name));
            if acquire_ok {
                Ok(())
            } else {
                Err(AcquireError::new("scripted failure"))
            }
        })
        .with_release(move || {
            release_journal.record(JournalEntry::Released(release_name.clone()));
            match release {
                ReleaseBehavior::Succeed => Ok(()),
                ReleaseBehavior::Fail => Err(TeardownError::new(format!(
                    "scripted release failure in {release_name}"
                ))),
                ReleaseBehavior::Panic => panic!("scripted release panic in {release_name}"),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_ok_stage() {
        let journal = ReleaseJournal::new();
        let stage = ScriptedStage::ok("a", FailureKind::TransportInitFailed).build(&journal);

        let guard = stage.acquire().unwrap();
        assert_eq!(journal.attempted(), vec!["a"]);
        assert!(journal.released().is_empty());

        assert!(guard.fire().is_ok());
        assert_eq!(
            journal.entries(),
            vec![
                JournalEntry::Attempted("a".to_string()),
                JournalEntry::Released("a".to_string()),
            ]
        );
    }

    #[test]
    fn test_scripted_failing_stage() {
        let journal = ReleaseJournal::new();
        let stage = ScriptedStage::failing("b", FailureKind::WindowCreateFailed).build(&journal);

        let (kind, _) = stage.acquire().unwrap_err();
        assert_eq!(kind, FailureKind::WindowCreateFailed);
        assert_eq!(journal.attempted(), vec!["b"]);
        assert!(journal.released().is_empty());
    }

    #[test]
    fn test_scripted_release_failure() {
        let journal = ReleaseJournal::new();
        let guard = ScriptedStage::ok("c", FailureKind::TransportInitFailed)
            .with_release(ReleaseBehavior::Fail)
            .build(&journal)
            .acquire()
            .unwrap();

        let failure = guard.fire().unwrap_err();
        assert!(failure.message.contains("scripted release failure"));
        assert_eq!(journal.released(), vec!["c"]);
    }
}
