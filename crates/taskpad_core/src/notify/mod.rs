//! Reminder scheduling contracts and implementations.
//!
//! # Responsibility
//! - Define the fire-and-forget scheduling contract used by the board driver.
//! - Provide an outbox the mobile shell drains into platform notifications.
//!
//! # Invariants
//! - Scheduling never cancels or replaces earlier reminders.
//! - Failures are returned to the caller, never retried here.

mod outbox;
mod recording;

pub use outbox::{PendingReminder, SqliteReminderOutbox};
pub use recording::RecordingScheduler;

use crate::db::DbError;
use crate::model::task::TaskId;
use chrono::{DateTime, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Title shown on every task reminder.
pub const REMINDER_TITLE: &str = "Task Reminder";

pub type NotifyResult<T> = Result<T, NotifyError>;

/// Local reminder to deliver at `fire_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderRequest {
    pub task_id: TaskId,
    pub title: String,
    /// Task text at scheduling time.
    pub body: String,
    pub fire_at: DateTime<Utc>,
}

impl ReminderRequest {
    pub fn for_task(task_id: TaskId, body: impl Into<String>, fire_at: DateTime<Utc>) -> Self {
        Self {
            task_id,
            title: REMINDER_TITLE.to_string(),
            body: body.into(),
            fire_at,
        }
    }
}

/// Scheduler-layer error.
#[derive(Debug)]
pub enum NotifyError {
    Db(DbError),
    /// Host-provided scheduler reported a failure.
    Backend(String),
}

impl Display for NotifyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Backend(message) => write!(f, "notification backend failure: {message}"),
        }
    }
}

impl Error for NotifyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Backend(_) => None,
        }
    }
}

impl From<DbError> for NotifyError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for NotifyError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Schedules local reminders.
pub trait NotificationScheduler {
    fn schedule(&self, request: &ReminderRequest) -> NotifyResult<()>;
}

impl<T: NotificationScheduler + ?Sized> NotificationScheduler for &T {
    fn schedule(&self, request: &ReminderRequest) -> NotifyResult<()> {
        (**self).schedule(request)
    }
}
