//! Automation execution log models and DTOs.
//!
//! One row per (transition, matched rule) firing, append-only.

use imovia_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An execution log row from the `automation_execution_logs` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ExecutionLog {
    pub id: DbId,
    pub rule_id: DbId,
    pub lead_id: DbId,
    pub status: String,
    pub details: Option<String>,
    pub executed_at: Timestamp,
}

/// Input for recording an execution log entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateExecutionLog {
    pub rule_id: DbId,
    pub lead_id: DbId,
    pub status: String,
    pub details: Option<String>,
}
