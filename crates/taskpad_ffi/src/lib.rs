//! Flutter-facing bindings for Taskpad core.

pub mod api;
