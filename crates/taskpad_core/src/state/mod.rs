//! Board state and its transitions.
//!
//! # Responsibility
//! - Own tasks, lists and selection state as one explicit value.
//! - Apply commands as I/O-free transitions that report the side effects
//!   an outer driver must run.
//!
//! # Invariants
//! - `current_list` always names an entry of `lists`.
//! - Every task's `list` names an entry of `lists` when created or edited.
//! - Ignored commands leave state untouched and emit no effects, except that
//!   a submit against a vanished edit target still clears the draft.

mod app_state;
mod command;
mod transition;

pub use app_state::{AppState, Draft};
pub use command::Command;
pub use transition::{Effect, IgnoreReason, Outcome, Transition};
