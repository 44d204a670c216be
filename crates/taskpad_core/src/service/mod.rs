//! Board driver.
//!
//! # Responsibility
//! - Load state at startup.
//! - Dispatch commands to pure transitions and execute the resulting effects.
//!
//! # Invariants
//! - Effect failures never roll back or block a state change.
//! - Effect failures are logged and reported, never retried.

pub mod loader;
pub mod task_board;
