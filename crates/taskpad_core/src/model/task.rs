//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record shared by state, storage and views.
//! - Provide validation for records created in core or loaded from storage.
//!
//! # Invariants
//! - `id` is stable for the task lifetime and never reused.
//! - `text` is non-blank once a task is created or edited.
//! - The serialized field names are `id`, `text`, `completed`, `dueDate`, `list`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task.
///
/// Stored as an opaque string so records written by older builds (which used
/// millisecond timestamps) keep loading.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generates a new time-ordered id.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Wraps an existing id string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    /// Reminder instant. Serialized as RFC 3339 or `null`.
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    /// Name of the owning list.
    pub list: String,
}

/// Validation errors for task records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyId,
    BlankText,
    BlankList,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "task id must not be empty"),
            Self::BlankText => write!(f, "task text must not be blank"),
            Self::BlankList => write!(f, "task list name must not be blank"),
        }
    }
}

impl Error for TaskValidationError {}

impl Task {
    /// Creates an open task with a generated id.
    pub fn new(text: impl Into<String>, list: impl Into<String>) -> Self {
        Self::with_id(TaskId::generate(), text, list)
    }

    /// Creates an open task with a caller-provided id.
    pub fn with_id(id: TaskId, text: impl Into<String>, list: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
            due_date: None,
            list: list.into(),
        }
    }

    /// Checks record-level invariants.
    ///
    /// List membership is checked by the state layer, which knows the list set.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.as_str().trim().is_empty() {
            return Err(TaskValidationError::EmptyId);
        }
        if self.text.trim().is_empty() {
            return Err(TaskValidationError::BlankText);
        }
        if self.list.trim().is_empty() {
            return Err(TaskValidationError::BlankList);
        }
        Ok(())
    }

    /// Case-insensitive substring match against the task text.
    ///
    /// `needle_lower` must already be lowercased.
    pub fn text_contains(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty() || self.text.to_lowercase().contains(needle_lower)
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskId, TaskValidationError};

    #[test]
    fn generated_ids_are_unique_and_non_empty() {
        let first = TaskId::generate();
        let second = TaskId::generate();
        assert!(!first.as_str().is_empty());
        assert_ne!(first, second);
    }

    #[test]
    fn validate_rejects_blank_text_and_empty_id() {
        let blank = Task::with_id(TaskId::new("1"), "   ", "Default");
        assert_eq!(blank.validate(), Err(TaskValidationError::BlankText));

        let no_id = Task::with_id(TaskId::new(""), "text", "Default");
        assert_eq!(no_id.validate(), Err(TaskValidationError::EmptyId));
    }

    #[test]
    fn text_contains_ignores_case() {
        let task = Task::new("Buy Milk", "Default");
        assert!(task.text_contains("milk"));
        assert!(task.text_contains(""));
        assert!(!task.text_contains("bread"));
    }
}
