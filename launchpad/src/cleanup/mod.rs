//! Scoped release guards and the ordered guard stack.
//!
//! This module provides:
//! - ScopeGuard for exactly-once release at scope exit
//! - GuardStack for LIFO teardown of acquired stages

mod guard;
mod stack;

pub use guard::{ReleaseAction, ScopeGuard};
pub use stack::{GuardStack, TeardownReport};
