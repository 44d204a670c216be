//! List names and task filter modes.
//!
//! # Invariants
//! - List names are unique within the list sequence (case-sensitive).
//! - The list sequence is append-only.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// List that is selected on first run.
pub const DEFAULT_LIST: &str = "Default";

/// Lists present on first run, in display order.
pub const DEFAULT_LISTS: &[&str] = &[DEFAULT_LIST, "Work", "Personal"];

/// Returns an owned copy of [`DEFAULT_LISTS`].
pub fn default_lists() -> Vec<String> {
    DEFAULT_LISTS.iter().map(|name| name.to_string()).collect()
}

/// Trims a candidate list name, returning `None` when nothing is left.
pub fn normalize_list_name(candidate: &str) -> Option<&str> {
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Collapses duplicate and blank names, keeping first occurrence order.
pub fn dedupe_lists(names: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if name.trim().is_empty() || unique.contains(&name) {
            continue;
        }
        unique.push(name);
    }
    unique
}

/// Completion filter applied to the current list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl TaskFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Parses `all|active|completed` (case-insensitive, trimmed).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Returns whether a task with the given completion flag passes.
    pub fn admits(self, completed: bool) -> bool {
        match self {
            Self::All => true,
            Self::Active => !completed,
            Self::Completed => completed,
        }
    }
}

impl Display for TaskFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{dedupe_lists, normalize_list_name, TaskFilter};

    #[test]
    fn filter_parse_accepts_known_values() {
        assert_eq!(TaskFilter::parse(" Active "), Some(TaskFilter::Active));
        assert_eq!(TaskFilter::parse("completed"), Some(TaskFilter::Completed));
        assert_eq!(TaskFilter::parse("done"), None);
    }

    #[test]
    fn filter_admits_by_completion() {
        assert!(TaskFilter::All.admits(true));
        assert!(TaskFilter::Active.admits(false));
        assert!(!TaskFilter::Active.admits(true));
        assert!(TaskFilter::Completed.admits(true));
    }

    #[test]
    fn dedupe_keeps_first_occurrence_and_drops_blank() {
        let names = vec![
            "Work".to_string(),
            " ".to_string(),
            "Home".to_string(),
            "Work".to_string(),
            "work".to_string(),
        ];
        assert_eq!(dedupe_lists(names), vec!["Work", "Home", "work"]);
    }

    #[test]
    fn normalize_list_name_trims() {
        assert_eq!(normalize_list_name("  Errands "), Some("Errands"));
        assert_eq!(normalize_list_name("\t"), None);
    }
}
