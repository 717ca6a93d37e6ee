//! Domain logic for the imovia pipeline board.
//!
//! This crate is pure: no I/O, no database, no HTTP. It holds the stage
//! catalog, the board projection, the automation rule types and matcher,
//! and the shared id/timestamp aliases and error type used by the other
//! workspace crates.

pub mod automation;
pub mod board;
pub mod error;
pub mod paging;
pub mod pipeline;
pub mod types;
