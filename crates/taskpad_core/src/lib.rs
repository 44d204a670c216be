//! Core domain logic for Taskpad.
//! This crate is the single source of truth for task board state and its
//! persistence rules.

pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod service;
pub mod state;
pub mod store;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::list::{TaskFilter, DEFAULT_LIST, DEFAULT_LISTS};
pub use model::prefs::{ACCENT_COLORS, DEFAULT_ACCENT_COLOR};
pub use model::task::{Task, TaskId, TaskValidationError};
pub use notify::{
    NotificationScheduler, NotifyError, NotifyResult, PendingReminder, RecordingScheduler,
    ReminderRequest, SqliteReminderOutbox,
};
pub use service::task_board::{DispatchReport, EffectFailure, TaskBoard};
pub use state::{AppState, Command, Draft, Effect, IgnoreReason, Outcome, Transition};
pub use store::{
    KeyValueStore, MemoryKvStore, SqliteKvStore, StorageKey, StoreError, StoreResult,
};
pub use view::{humanize_due, visible_tasks, BoardSnapshot};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
