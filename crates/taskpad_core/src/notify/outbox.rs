//! SQLite reminder outbox.
//!
//! Core cannot post platform notifications itself. Scheduled reminders are
//! queued in `reminder_outbox`; the mobile shell drains the queue and hands
//! each entry to the platform scheduler.
//!
//! # Invariants
//! - Drained rows are deleted in the same transaction that reads them.
//! - Drain order is `fire_at_ms ASC, id ASC`.
//! - Rows whose `fire_at_ms` is out of range are deleted without being
//!   returned and do not count toward the drain limit.

use super::{NotificationScheduler, NotifyResult, ReminderRequest};
use crate::db::{open_db, open_db_in_memory};
use crate::model::task::TaskId;
use chrono::{DateTime, Utc};
use log::warn;
use rusqlite::{params, Connection};
use std::path::Path;

/// Outbox entry ready for platform delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReminder {
    /// Outbox row id.
    pub id: i64,
    pub request: ReminderRequest,
}

pub struct SqliteReminderOutbox {
    conn: Connection,
}

impl SqliteReminderOutbox {
    pub fn open(path: impl AsRef<Path>) -> NotifyResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    pub fn open_in_memory() -> NotifyResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Removes and returns up to `limit` queued reminders.
    pub fn take_pending(&mut self, limit: u32) -> NotifyResult<Vec<PendingReminder>> {
        let tx = self.conn.transaction()?;
        let mut pending = Vec::new();
        let mut remaining = limit;
        while remaining > 0 {
            let rows = query_rows(&tx, remaining)?;
            if rows.is_empty() {
                break;
            }
            for (id, reminder) in rows {
                tx.execute("DELETE FROM reminder_outbox WHERE id = ?1;", [id])?;
                if let Some(reminder) = reminder {
                    pending.push(reminder);
                    remaining -= 1;
                }
            }
        }
        tx.commit()?;
        Ok(pending)
    }
}

impl NotificationScheduler for SqliteReminderOutbox {
    fn schedule(&self, request: &ReminderRequest) -> NotifyResult<()> {
        self.conn.execute(
            "INSERT INTO reminder_outbox (task_id, title, body, fire_at_ms)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                request.task_id.as_str(),
                request.title.as_str(),
                request.body.as_str(),
                request.fire_at.timestamp_millis(),
            ],
        )?;
        Ok(())
    }
}

/// Reads up to `limit` rows in drain order. Rows that cannot be decoded come
/// back as `(id, None)`.
fn query_rows(
    conn: &Connection,
    limit: u32,
) -> NotifyResult<Vec<(i64, Option<PendingReminder>)>> {
    let mut stmt = conn.prepare(
        "SELECT id, task_id, title, body, fire_at_ms
         FROM reminder_outbox
         ORDER BY fire_at_ms ASC, id ASC
         LIMIT ?1;",
    )?;
    let rows = stmt.query_map([i64::from(limit)], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, i64>(4)?,
        ))
    })?;

    let mut out = Vec::new();
    for row in rows {
        let (id, task_id, title, body, fire_at_ms) = row?;
        let Some(fire_at) = DateTime::<Utc>::from_timestamp_millis(fire_at_ms) else {
            warn!("event=outbox_read module=notify status=discarded outbox_id={id} reason=invalid_fire_at");
            out.push((id, None));
            continue;
        };
        let reminder = PendingReminder {
            id,
            request: ReminderRequest {
                task_id: TaskId::new(task_id),
                title,
                body,
                fire_at,
            },
        };
        out.push((id, Some(reminder)));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::SqliteReminderOutbox;
    use crate::model::task::TaskId;
    use crate::notify::{NotificationScheduler, ReminderRequest, REMINDER_TITLE};
    use chrono::{TimeZone, Utc};

    #[test]
    fn take_pending_drains_in_fire_order() {
        let mut outbox = SqliteReminderOutbox::open_in_memory().unwrap();
        let late = Utc.with_ymd_and_hms(2026, 5, 2, 9, 0, 0).unwrap();
        let early = Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap();
        outbox
            .schedule(&ReminderRequest::for_task(TaskId::new("b"), "late", late))
            .unwrap();
        outbox
            .schedule(&ReminderRequest::for_task(TaskId::new("a"), "early", early))
            .unwrap();

        let first = outbox.take_pending(1).unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].request.body, "early");
        assert_eq!(first[0].request.title, REMINDER_TITLE);
        assert_eq!(first[0].request.fire_at, early);

        let rest = outbox.take_pending(10).unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].request.task_id, TaskId::new("b"));
        assert!(outbox.take_pending(10).unwrap().is_empty());
    }

    #[test]
    fn rows_with_invalid_fire_time_are_discarded_without_stalling() {
        let mut outbox = SqliteReminderOutbox::open_in_memory().unwrap();
        for task_id in ["bad-1", "bad-2"] {
            outbox
                .conn
                .execute(
                    "INSERT INTO reminder_outbox (task_id, title, body, fire_at_ms)
                     VALUES (?1, 'Task Reminder', 'x', ?2);",
                    rusqlite::params![task_id, i64::MIN],
                )
                .unwrap();
        }
        let due = Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap();
        outbox
            .schedule(&ReminderRequest::for_task(TaskId::new("ok"), "valid", due))
            .unwrap();

        let drained = outbox.take_pending(1).unwrap();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].request.task_id, TaskId::new("ok"));

        let left: i64 = outbox
            .conn
            .query_row("SELECT COUNT(*) FROM reminder_outbox;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(left, 0);
    }
}
