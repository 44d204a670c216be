//! Command application.
//!
//! `AppState::apply` performs no I/O. Persistence writes and reminder
//! scheduling come back as [`Effect`] values for the driver to execute.

use super::app_state::{AppState, Draft};
use super::command::Command;
use crate::model::list::{normalize_list_name, TaskFilter};
use crate::model::prefs::palette_color;
use crate::model::task::{Task, TaskId};
use crate::notify::ReminderRequest;
use crate::store::StorageKey;
use chrono::{DateTime, Utc};
use std::fmt::{Display, Formatter};

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Write the whole collection stored under this key.
    Persist(StorageKey),
    ScheduleReminder(ReminderRequest),
}

/// Why a command left state unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    BlankText,
    UnknownTask(TaskId),
    /// A new task would reuse an existing id.
    DuplicateTask(TaskId),
    UnknownList(String),
    BlankListName,
    DuplicateList(String),
    UnsupportedAccent(String),
    /// Command would not change anything.
    Unchanged,
}

impl Display for IgnoreReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankText => write!(f, "blank_text"),
            Self::UnknownTask(_) => write!(f, "unknown_task"),
            Self::DuplicateTask(_) => write!(f, "duplicate_task"),
            Self::UnknownList(_) => write!(f, "unknown_list"),
            Self::BlankListName => write!(f, "blank_list_name"),
            Self::DuplicateList(_) => write!(f, "duplicate_list"),
            Self::UnsupportedAccent(_) => write!(f, "unsupported_accent"),
            Self::Unchanged => write!(f, "unchanged"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Ignored(IgnoreReason),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Result of applying one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub outcome: Outcome,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn applied(effects: Vec<Effect>) -> Self {
        Self {
            outcome: Outcome::Applied,
            effects,
        }
    }

    fn ignored(reason: IgnoreReason) -> Self {
        Self {
            outcome: Outcome::Ignored(reason),
            effects: Vec::new(),
        }
    }
}

impl AppState {
    /// Applies one command and returns the effects to run.
    pub fn apply(&mut self, command: Command) -> Transition {
        match command {
            Command::SubmitTask {
                new_id,
                text,
                due_date,
                list,
            } => self.submit_task(new_id, &text, due_date, list),
            Command::BeginEdit(id) => self.begin_edit(id),
            Command::CancelEdit => {
                if self.draft == Draft::default() {
                    return Transition::ignored(IgnoreReason::Unchanged);
                }
                self.draft = Draft::default();
                Transition::applied(Vec::new())
            }
            Command::ToggleTask(id) => match self.task_mut(&id) {
                Some(task) => {
                    task.completed = !task.completed;
                    Transition::applied(vec![Effect::Persist(StorageKey::Tasks)])
                }
                None => Transition::ignored(IgnoreReason::UnknownTask(id)),
            },
            Command::DeleteTask(id) => self.delete_task(id),
            Command::AddList(name) => self.add_list(&name),
            Command::SelectList(name) => self.select_list(name),
            Command::SetFilter(filter) => self.set_filter(filter),
            Command::SetSearch(search) => {
                if self.search == search {
                    return Transition::ignored(IgnoreReason::Unchanged);
                }
                self.search = search;
                Transition::applied(Vec::new())
            }
            Command::SetAccentColor(color) => self.set_accent_color(color),
            Command::SetDarkMode(enabled) => {
                if self.dark_mode == enabled {
                    return Transition::ignored(IgnoreReason::Unchanged);
                }
                self.dark_mode = enabled;
                Transition::applied(vec![Effect::Persist(StorageKey::DarkMode)])
            }
        }
    }

    fn submit_task(
        &mut self,
        new_id: TaskId,
        text: &str,
        due_date: Option<DateTime<Utc>>,
        list: Option<String>,
    ) -> Transition {
        let text = text.trim();
        if text.is_empty() {
            return Transition::ignored(IgnoreReason::BlankText);
        }
        let list = list.unwrap_or_else(|| self.current_list.clone());
        if !self.has_list(&list) {
            return Transition::ignored(IgnoreReason::UnknownList(list));
        }

        if let Some(editing) = self.draft.editing.take() {
            self.draft = Draft::default();
            // Edits never touch reminders, scheduled or not.
            return match self.task_mut(&editing) {
                Some(task) => {
                    task.text = text.to_string();
                    task.due_date = due_date;
                    task.list = list;
                    Transition::applied(vec![Effect::Persist(StorageKey::Tasks)])
                }
                None => Transition::ignored(IgnoreReason::UnknownTask(editing)),
            };
        }

        if self.task(&new_id).is_some() {
            return Transition::ignored(IgnoreReason::DuplicateTask(new_id));
        }
        let mut task = Task::with_id(new_id, text, list);
        task.due_date = due_date;
        let mut effects = vec![Effect::Persist(StorageKey::Tasks)];
        if let Some(fire_at) = due_date {
            effects.push(Effect::ScheduleReminder(ReminderRequest::for_task(
                task.id.clone(),
                text,
                fire_at,
            )));
        }
        self.tasks.push(task);
        self.draft = Draft::default();
        Transition::applied(effects)
    }

    fn begin_edit(&mut self, id: TaskId) -> Transition {
        let Some(task) = self.task(&id) else {
            return Transition::ignored(IgnoreReason::UnknownTask(id));
        };
        self.draft = Draft {
            text: task.text.clone(),
            due_date: task.due_date,
            editing: Some(id),
        };
        Transition::applied(Vec::new())
    }

    fn delete_task(&mut self, id: TaskId) -> Transition {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        if self.tasks.len() == before {
            return Transition::ignored(IgnoreReason::UnknownTask(id));
        }
        if self.draft.editing.as_ref() == Some(&id) {
            self.draft = Draft::default();
        }
        Transition::applied(vec![Effect::Persist(StorageKey::Tasks)])
    }

    fn add_list(&mut self, candidate: &str) -> Transition {
        let Some(name) = normalize_list_name(candidate) else {
            return Transition::ignored(IgnoreReason::BlankListName);
        };
        if self.has_list(name) {
            return Transition::ignored(IgnoreReason::DuplicateList(name.to_string()));
        }
        self.lists.push(name.to_string());
        self.current_list = name.to_string();
        Transition::applied(vec![
            Effect::Persist(StorageKey::Lists),
            Effect::Persist(StorageKey::CurrentList),
        ])
    }

    fn select_list(&mut self, name: String) -> Transition {
        if !self.has_list(&name) {
            return Transition::ignored(IgnoreReason::UnknownList(name));
        }
        if self.current_list == name {
            return Transition::ignored(IgnoreReason::Unchanged);
        }
        self.current_list = name;
        Transition::applied(vec![Effect::Persist(StorageKey::CurrentList)])
    }

    fn set_filter(&mut self, filter: TaskFilter) -> Transition {
        if self.filter == filter {
            return Transition::ignored(IgnoreReason::Unchanged);
        }
        self.filter = filter;
        Transition::applied(Vec::new())
    }

    fn set_accent_color(&mut self, candidate: String) -> Transition {
        let Some(color) = palette_color(&candidate) else {
            return Transition::ignored(IgnoreReason::UnsupportedAccent(candidate));
        };
        if self.accent_color == color {
            return Transition::ignored(IgnoreReason::Unchanged);
        }
        self.accent_color = color.to_string();
        Transition::applied(vec![Effect::Persist(StorageKey::AccentColor)])
    }
}
