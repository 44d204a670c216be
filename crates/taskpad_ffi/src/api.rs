//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose one function per board intent to Dart via FRB.
//! - Hold the process-wide board session.
//! - Flatten core types into plain envelopes for the UI.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Calls are serialized by the session mutex.
//! - Validation no-ops come back as `applied=false`, not as errors.

use chrono::{DateTime, Utc};
use log::{error, info};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};
use taskpad_core::view::due_label::humanize_due_local;
use taskpad_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    BoardSnapshot, DispatchReport, Outcome, SqliteKvStore, SqliteReminderOutbox, Task,
    TaskBoard, TaskFilter, TaskId, ACCENT_COLORS,
};

const DB_FILE_NAME: &str = "taskpad.sqlite3";
const DB_PATH_ENV: &str = "TASKPAD_DB_PATH";
const REMINDER_DEFAULT_LIMIT: u32 = 20;
const REMINDER_LIMIT_MAX: u32 = 100;

type SessionBoard = TaskBoard<SqliteKvStore, SqliteReminderOutbox>;

struct Session {
    db_path: PathBuf,
    board: SessionBoard,
}

static SESSION: Mutex<Option<Session>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Task row ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: String,
    pub text: String,
    pub completed: bool,
    /// Due instant in epoch milliseconds.
    pub due_epoch_ms: Option<i64>,
    /// Humanized due label in the device time zone.
    pub due_label: Option<String>,
    pub list: String,
}

/// Render state for the whole board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    /// Tasks after list, filter and search are applied.
    pub tasks: Vec<TaskItem>,
    pub lists: Vec<String>,
    pub current_list: String,
    /// `all|active|completed`.
    pub filter: String,
    pub search: String,
    pub accent_color: String,
    pub dark_mode: bool,
    /// Task id being edited, when the edit dialog is open.
    pub editing_id: Option<String>,
    pub draft_text: String,
    pub draft_due_epoch_ms: Option<i64>,
}

/// Response envelope for every board call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardResponse {
    /// Whether the call reached the board.
    pub ok: bool,
    /// Whether the intent changed state.
    pub applied: bool,
    /// Diagnostics only; the UI does not surface it to the user.
    pub message: String,
    /// Board after the call; `None` when the session is unavailable.
    pub board: Option<BoardView>,
}

impl BoardResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            applied: false,
            message: message.into(),
            board: None,
        }
    }
}

/// Queued reminder handed to the platform notification API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderItem {
    pub task_id: String,
    pub title: String,
    pub body: String,
    pub fire_at_epoch_ms: i64,
}

/// Drain envelope for queued reminders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderBatch {
    pub items: Vec<ReminderItem>,
    pub message: String,
}

/// Opens (or reopens) the board session on a database file.
///
/// A blank `db_path` uses `TASKPAD_DB_PATH`, then the temp directory.
///
/// # FFI contract
/// - Sync call; performs DB bootstrap and a full state load.
/// - Replaces any existing session.
#[flutter_rust_bridge::frb(sync)]
pub fn board_open(db_path: String) -> BoardResponse {
    let path = resolve_db_path(db_path.as_str());
    let mut guard = lock_session();
    match open_session(path) {
        Ok(session) => {
            let view = to_board_view(&session.board.snapshot());
            *guard = Some(session);
            BoardResponse {
                ok: true,
                applied: true,
                message: "Board opened.".to_string(),
                board: Some(view),
            }
        }
        Err(err) => BoardResponse::failure(format!("board_open failed: {err}")),
    }
}

/// Returns the current board without changing it.
#[flutter_rust_bridge::frb(sync)]
pub fn board_snapshot() -> BoardResponse {
    with_board(|_| None)
}

/// Adds a task, or saves the edit started by [`task_begin_edit`].
///
/// `list` defaults to the current list.
#[flutter_rust_bridge::frb(sync)]
pub fn task_submit(text: String, due_epoch_ms: Option<i64>, list: Option<String>) -> BoardResponse {
    let due_date = match due_epoch_ms.map(DateTime::<Utc>::from_timestamp_millis) {
        None => None,
        Some(Some(due)) => Some(due),
        Some(None) => {
            return BoardResponse::failure(format!(
                "task_submit failed: due_epoch_ms out of range: {}",
                due_epoch_ms.unwrap_or_default()
            ))
        }
    };
    with_board(|board| Some(board.submit_task(text.as_str(), due_date, list.as_deref())))
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_begin_edit(id: String) -> BoardResponse {
    with_board(|board| Some(board.begin_edit(TaskId::new(id))))
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_cancel_edit() -> BoardResponse {
    with_board(|board| Some(board.cancel_edit()))
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle(id: String) -> BoardResponse {
    with_board(|board| Some(board.toggle_task(TaskId::new(id))))
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(id: String) -> BoardResponse {
    with_board(|board| Some(board.delete_task(TaskId::new(id))))
}

/// Appends a list and selects it.
#[flutter_rust_bridge::frb(sync)]
pub fn list_add(name: String) -> BoardResponse {
    with_board(|board| Some(board.add_list(name.as_str())))
}

#[flutter_rust_bridge::frb(sync)]
pub fn list_select(name: String) -> BoardResponse {
    with_board(|board| Some(board.select_list(name.as_str())))
}

/// Sets the completion filter (`all|active|completed`).
#[flutter_rust_bridge::frb(sync)]
pub fn filter_set(filter: String) -> BoardResponse {
    let Some(filter) = TaskFilter::parse(filter.as_str()) else {
        return BoardResponse::failure(format!(
            "filter_set failed: unsupported filter `{}`; expected all|active|completed",
            filter.trim()
        ));
    };
    with_board(|board| Some(board.set_filter(filter)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn search_set(text: String) -> BoardResponse {
    with_board(|board| Some(board.set_search(text.as_str())))
}

/// Sets the accent color; only [`accent_palette`] entries are accepted.
#[flutter_rust_bridge::frb(sync)]
pub fn accent_set(color: String) -> BoardResponse {
    with_board(|board| Some(board.set_accent_color(color.as_str())))
}

/// Selectable accent colors in picker order.
#[flutter_rust_bridge::frb(sync)]
pub fn accent_palette() -> Vec<String> {
    ACCENT_COLORS.iter().map(|color| color.to_string()).collect()
}

#[flutter_rust_bridge::frb(sync)]
pub fn dark_mode_set(enabled: bool) -> BoardResponse {
    with_board(|board| Some(board.set_dark_mode(enabled)))
}

/// Removes and returns queued reminders for platform scheduling.
///
/// # FFI contract
/// - `limit` is clamped to `1..=100`; `None` or `0` uses 20.
/// - Returned reminders are gone from the queue.
#[flutter_rust_bridge::frb(sync)]
pub fn reminders_take_pending(limit: Option<u32>) -> ReminderBatch {
    let limit = normalize_reminder_limit(limit);
    let mut guard = lock_session();
    let session = match ensure_session(&mut guard) {
        Ok(session) => session,
        Err(err) => {
            return ReminderBatch {
                items: Vec::new(),
                message: format!("reminders_take_pending failed: {err}"),
            }
        }
    };

    match session.board.scheduler_mut().take_pending(limit) {
        Ok(pending) => {
            let items = pending
                .into_iter()
                .map(|reminder| ReminderItem {
                    task_id: reminder.request.task_id.to_string(),
                    title: reminder.request.title,
                    body: reminder.request.body,
                    fire_at_epoch_ms: reminder.request.fire_at.timestamp_millis(),
                })
                .collect::<Vec<_>>();
            let message = format!("Took {} reminder(s).", items.len());
            ReminderBatch { items, message }
        }
        Err(err) => ReminderBatch {
            items: Vec::new(),
            message: format!("reminders_take_pending failed: {err}"),
        },
    }
}

fn lock_session() -> MutexGuard<'static, Option<Session>> {
    // A panic while holding the lock leaves the board usable.
    SESSION.lock().unwrap_or_else(PoisonError::into_inner)
}

fn open_session(db_path: PathBuf) -> Result<Session, String> {
    let store = SqliteKvStore::open(&db_path).map_err(|err| format!("store open failed: {err}"))?;
    let outbox = SqliteReminderOutbox::open(&db_path)
        .map_err(|err| format!("reminder outbox open failed: {err}"))?;
    info!(
        "event=session_open module=ffi status=ok db_path={}",
        db_path.display()
    );
    Ok(Session {
        db_path,
        board: TaskBoard::load(store, outbox),
    })
}

fn ensure_session<'a>(guard: &'a mut Option<Session>) -> Result<&'a mut Session, String> {
    if guard.is_none() {
        *guard = Some(open_session(resolve_db_path(""))?);
    }
    guard
        .as_mut()
        .ok_or_else(|| "board session unavailable".to_string())
}

fn with_board(f: impl FnOnce(&mut SessionBoard) -> Option<DispatchReport>) -> BoardResponse {
    let mut guard = lock_session();
    let session = match ensure_session(&mut guard) {
        Ok(session) => session,
        Err(err) => {
            error!("event=session_open module=ffi status=error error={err}");
            return BoardResponse::failure(err);
        }
    };

    let report = f(&mut session.board);
    let view = to_board_view(&session.board.snapshot());
    let Some(report) = report else {
        return BoardResponse {
            ok: true,
            applied: false,
            message: String::new(),
            board: Some(view),
        };
    };

    BoardResponse {
        ok: true,
        applied: report.is_applied(),
        message: report_message(&report, session),
        board: Some(view),
    }
}

fn report_message(report: &DispatchReport, session: &Session) -> String {
    if !report.failures.is_empty() {
        let details = report
            .failures
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        return format!("{details} (db={})", session.db_path.display());
    }
    match &report.outcome {
        Outcome::Applied => String::new(),
        Outcome::Ignored(reason) => format!("ignored: {reason}"),
    }
}

fn to_board_view(snapshot: &BoardSnapshot) -> BoardView {
    let now = Utc::now();
    BoardView {
        tasks: snapshot
            .visible_tasks
            .iter()
            .map(|task| to_task_item(task, now))
            .collect(),
        lists: snapshot.lists.clone(),
        current_list: snapshot.current_list.clone(),
        filter: snapshot.filter.as_str().to_string(),
        search: snapshot.search.clone(),
        accent_color: snapshot.accent_color.clone(),
        dark_mode: snapshot.dark_mode,
        editing_id: snapshot.draft.editing.as_ref().map(ToString::to_string),
        draft_text: snapshot.draft.text.clone(),
        draft_due_epoch_ms: snapshot.draft.due_date.map(|due| due.timestamp_millis()),
    }
}

fn to_task_item(task: &Task, now: DateTime<Utc>) -> TaskItem {
    TaskItem {
        id: task.id.to_string(),
        text: task.text.clone(),
        completed: task.completed,
        due_epoch_ms: task.due_date.map(|due| due.timestamp_millis()),
        due_label: task.due_date.map(|due| humanize_due_local(due, now)),
        list: task.list.clone(),
    }
}

fn normalize_reminder_limit(limit: Option<u32>) -> u32 {
    match limit {
        None | Some(0) => REMINDER_DEFAULT_LIMIT,
        Some(value) => value.min(REMINDER_LIMIT_MAX),
    }
}

fn resolve_db_path(requested: &str) -> PathBuf {
    let requested = requested.trim();
    if !requested.is_empty() {
        return PathBuf::from(requested);
    }
    if let Ok(raw) = std::env::var(DB_PATH_ENV) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(DB_FILE_NAME)
}
