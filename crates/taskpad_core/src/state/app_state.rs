use crate::model::list::{default_lists, TaskFilter, DEFAULT_LIST};
use crate::model::prefs::DEFAULT_ACCENT_COLOR;
use crate::model::task::{Task, TaskId};
use chrono::{DateTime, Utc};

/// Transient compose/edit input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    /// Task being edited; `None` while composing a new task.
    pub editing: Option<TaskId>,
    pub text: String,
    pub due_date: Option<DateTime<Utc>>,
}

impl Draft {
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }
}

/// Everything the board owns for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub(crate) tasks: Vec<Task>,
    pub(crate) lists: Vec<String>,
    pub(crate) current_list: String,
    pub(crate) filter: TaskFilter,
    pub(crate) search: String,
    pub(crate) accent_color: String,
    pub(crate) dark_mode: bool,
    pub(crate) draft: Draft,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            lists: default_lists(),
            current_list: DEFAULT_LIST.to_string(),
            filter: TaskFilter::All,
            search: String::new(),
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
            dark_mode: false,
            draft: Draft::default(),
        }
    }
}

impl AppState {
    /// Tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn lists(&self) -> &[String] {
        &self.lists
    }

    pub fn current_list(&self) -> &str {
        &self.current_list
    }

    pub fn filter(&self) -> TaskFilter {
        self.filter
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn accent_color(&self) -> &str {
        &self.accent_color
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn has_list(&self, name: &str) -> bool {
        self.lists.iter().any(|list| list == name)
    }

    pub(crate) fn task_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| &task.id == id)
    }
}
