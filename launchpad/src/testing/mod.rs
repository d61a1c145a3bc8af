//! Testing utilities for stage lists.
//!
//! This module provides:
//! - ReleaseJournal, a shared record of acquisitions and releases
//! - ScriptedStage, a stage whose outcome is fixed up front

mod scripted;

pub use scripted::{JournalEntry, ReleaseBehavior, ReleaseJournal, ScriptedStage};
