use crate::model::list::TaskFilter;
use crate::model::task::TaskId;
use chrono::{DateTime, Utc};

/// User intents accepted by [`crate::state::AppState::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Adds a new task, or saves the task named by the draft's edit target.
    ///
    /// `new_id` is only used when a task is created. `list` defaults to the
    /// current list.
    SubmitTask {
        new_id: TaskId,
        text: String,
        due_date: Option<DateTime<Utc>>,
        list: Option<String>,
    },
    BeginEdit(TaskId),
    CancelEdit,
    ToggleTask(TaskId),
    DeleteTask(TaskId),
    AddList(String),
    SelectList(String),
    SetFilter(TaskFilter),
    SetSearch(String),
    SetAccentColor(String),
    SetDarkMode(bool),
}

impl Command {
    /// Stable name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SubmitTask { .. } => "submit_task",
            Self::BeginEdit(_) => "begin_edit",
            Self::CancelEdit => "cancel_edit",
            Self::ToggleTask(_) => "toggle_task",
            Self::DeleteTask(_) => "delete_task",
            Self::AddList(_) => "add_list",
            Self::SelectList(_) => "select_list",
            Self::SetFilter(_) => "set_filter",
            Self::SetSearch(_) => "set_search",
            Self::SetAccentColor(_) => "set_accent_color",
            Self::SetDarkMode(_) => "set_dark_mode",
        }
    }
}
