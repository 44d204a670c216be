//! Domain model for the task board.
//!
//! # Responsibility
//! - Define the canonical task record and its persisted shape.
//! - Define list names, filter modes and theme preferences.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Every task belongs to exactly one list, referenced by name.
//! - Deletion is a hard delete; there is no tombstone state.

pub mod list;
pub mod prefs;
pub mod task;
