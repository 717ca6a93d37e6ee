//! Append-only execution audit trail.
//!
//! Contract: recording must not throw. A failed write is reported through
//! tracing and otherwise swallowed — a logging failure never aborts the
//! automation loop and never masks the action's own outcome.

use std::sync::Arc;

use imovia_core::types::DbId;
use imovia_db::models::execution_log::CreateExecutionLog;

use crate::executor::ExecutionOutcome;
use crate::store::AutomationStore;

/// Writes one execution record per rule firing.
pub struct ExecutionRecorder<S> {
    store: Arc<S>,
}

impl<S: AutomationStore> ExecutionRecorder<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Append the outcome of one firing to the audit trail.
    pub async fn record(&self, rule_id: DbId, lead_id: DbId, outcome: &ExecutionOutcome) {
        let record = CreateExecutionLog {
            rule_id,
            lead_id,
            status: outcome.status.as_str().to_string(),
            details: Some(outcome.details.clone()),
        };

        if let Err(e) = self.store.append_execution_record(record).await {
            tracing::warn!(
                rule_id,
                lead_id,
                error = %e,
                "Failed to persist execution record"
            );
        }
    }
}
