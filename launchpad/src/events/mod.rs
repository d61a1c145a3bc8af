//! Event observers and notification sinks.
//!
//! Observers see every lifecycle event of a run; notification sinks see at
//! most one user-facing notice per run.

mod notify;
mod observer;

#[cfg(feature = "native-dialog")]
pub use notify::DialogNotificationSink;
pub use notify::{
    CollectingNotificationSink, LoggingNotificationSink, NoOpNotificationSink, NotificationSink,
};
pub use observer::{CollectingObserver, EventObserver, LoggingObserver, NoOpObserver};
