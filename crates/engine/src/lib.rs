//! Transition engine: the drag lifecycle controller and stage-transition
//! automation.
//!
//! This crate owns the board's write path:
//!
//! - [`TransitionController`] — validates and persists a drag-driven stage
//!   move, then runs the automation loop for it.
//! - [`AutomationStore`] — the persistence seam the controller consumes;
//!   [`PgStore`] is the Postgres-backed implementation.
//! - [`ActionExecutor`] — polymorphic dispatch over the matched rules'
//!   action kinds (webhook performs a real call, the other kinds are
//!   configuration placeholders).
//! - [`ExecutionRecorder`] — append-only audit trail, exactly one record
//!   per matched rule per transition.

pub mod controller;
pub mod executor;
pub mod pg;
pub mod recorder;
pub mod store;
pub mod webhook;

pub use controller::{DiscardReason, RuleFiring, TransitionController, TransitionOutcome};
pub use executor::{ActionExecutor, ExecutionOutcome};
pub use pg::PgStore;
pub use recorder::ExecutionRecorder;
pub use store::{AutomationStore, StoreError};
pub use webhook::WebhookDelivery;
