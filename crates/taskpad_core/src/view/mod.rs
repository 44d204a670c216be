//! Read-side projections for the presentation layer.
//!
//! # Responsibility
//! - Derive the visible task subset from board state.
//! - Package everything a render needs into one snapshot.
//! - Humanize due dates for display.
//!
//! # Invariants
//! - Projections are pure; they never mutate state.
//! - Visible tasks keep the insertion order of the task collection.

pub mod due_label;

pub use due_label::humanize_due;

use crate::model::list::TaskFilter;
use crate::model::task::Task;
use crate::state::{AppState, Draft};

/// Returns tasks in `current_list` that pass `filter` and contain `search`
/// (case-insensitive).
pub fn visible_tasks<'a>(
    tasks: &'a [Task],
    current_list: &str,
    filter: TaskFilter,
    search: &str,
) -> Vec<&'a Task> {
    let needle = search.to_lowercase();
    tasks
        .iter()
        .filter(|task| task.list == current_list)
        .filter(|task| filter.admits(task.completed))
        .filter(|task| task.text_contains(&needle))
        .collect()
}

/// Everything the presentation layer renders from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub visible_tasks: Vec<Task>,
    pub lists: Vec<String>,
    pub current_list: String,
    pub filter: TaskFilter,
    pub search: String,
    pub accent_color: String,
    pub dark_mode: bool,
    pub draft: Draft,
}

impl BoardSnapshot {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            visible_tasks: visible_tasks(
                state.tasks(),
                state.current_list(),
                state.filter(),
                state.search(),
            )
            .into_iter()
            .cloned()
            .collect(),
            lists: state.lists().to_vec(),
            current_list: state.current_list().to_string(),
            filter: state.filter(),
            search: state.search().to_string(),
            accent_color: state.accent_color().to_string(),
            dark_mode: state.dark_mode(),
            draft: state.draft().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::visible_tasks;
    use crate::model::list::TaskFilter;
    use crate::model::task::{Task, TaskId};

    fn task(id: &str, text: &str, list: &str, completed: bool) -> Task {
        let mut task = Task::with_id(TaskId::new(id), text, list);
        task.completed = completed;
        task
    }

    fn ids(tasks: Vec<&Task>) -> Vec<&str> {
        tasks.into_iter().map(|task| task.id.as_str()).collect()
    }

    #[test]
    fn active_filter_returns_open_tasks_of_list_in_order() {
        let tasks = vec![
            task("1", "a", "Work", false),
            task("2", "b", "Default", false),
            task("3", "c", "Work", true),
            task("4", "d", "Work", false),
        ];
        assert_eq!(
            ids(visible_tasks(&tasks, "Work", TaskFilter::Active, "")),
            vec!["1", "4"]
        );
        assert_eq!(
            ids(visible_tasks(&tasks, "Work", TaskFilter::Completed, "")),
            vec!["3"]
        );
        assert_eq!(
            ids(visible_tasks(&tasks, "Work", TaskFilter::All, "")),
            vec!["1", "3", "4"]
        );
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let tasks = vec![
            task("1", "Buy MILK", "Default", false),
            task("2", "Call mom", "Default", false),
        ];
        assert_eq!(
            ids(visible_tasks(&tasks, "Default", TaskFilter::All, "milk")),
            vec!["1"]
        );
        assert_eq!(
            ids(visible_tasks(&tasks, "Default", TaskFilter::All, "M")),
            vec!["1", "2"]
        );
    }
}
