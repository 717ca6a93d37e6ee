//! Request handlers, one module per route group.

pub mod automation_rules;
pub mod board;
