//! A single fallible acquisition step with its paired release.

use std::fmt;

use crate::cleanup::{ReleaseAction, ScopeGuard};
use crate::errors::{AcquireError, FailureKind, TeardownError};

/// Acquisition closure of a stage.
pub type AcquireAction = Box<dyn FnOnce() -> Result<(), AcquireError>>;

/// One ordered acquisition step.
///
/// The release action only ever runs if `acquire` succeeded, and then at most
/// once, because it moves into a [`ScopeGuard`] on success and is dropped
/// unrun on failure. An `acquire` that allocates and then fails must clean up
/// after itself before returning the error.
pub struct Stage {
    name: String,
    kind: FailureKind,
    acquire: AcquireAction,
    release: Option<ReleaseAction>,
}

impl Stage {
    /// Creates a stage with no release action.
    pub fn new<A>(name: impl Into<String>, kind: FailureKind, acquire: A) -> Self
    where
        A: FnOnce() -> Result<(), AcquireError> + 'static,
    {
        Self {
            name: name.into(),
            kind,
            acquire: Box::new(acquire),
            release: None,
        }
    }

    /// Sets a fallible release action.
    #[must_use]
    pub fn with_release<R>(mut self, release: R) -> Self
    where
        R: FnOnce() -> Result<(), TeardownError> + 'static,
    {
        self.release = Some(Box::new(release));
        self
    }

    /// Sets a release action that cannot report failure.
    #[must_use]
    pub fn with_infallible_release<R>(self, release: R) -> Self
    where
        R: FnOnce() + 'static,
    {
        self.with_release(move || {
            release();
            Ok(())
        })
    }

    /// Returns the stage name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the failure kind this stage reports.
    #[must_use]
    pub fn failure_kind(&self) -> FailureKind {
        self.kind
    }

    /// Returns true if the stage has a release action.
    #[must_use]
    pub fn has_release(&self) -> bool {
        self.release.is_some()
    }

    /// Runs the acquisition.
    ///
    /// On success the release action is handed back inside an armed guard.
    pub fn acquire(self) -> Result<ScopeGuard, (FailureKind, AcquireError)> {
        let Self {
            name,
            kind,
            acquire,
            release,
        } = self;

        acquire().map_err(|err| (kind, err))?;

        let label = format!("Cleanup {name}");
        Ok(match release {
            Some(action) => ScopeGuard::new(label, action),
            None => ScopeGuard::noop(label),
        })
    }
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("has_release", &self.has_release())
            .finish()
    }
}
