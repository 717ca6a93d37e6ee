//! The persistence seam consumed by the transition controller.
//!
//! The controller never touches a database directly — it sees this trait,
//! one attempt per call, no retries. [`crate::pg::PgStore`] implements it
//! over the repository layer; tests implement it in memory.

use async_trait::async_trait;

use imovia_core::types::DbId;
use imovia_db::models::automation_rule::AutomationRule;
use imovia_db::models::execution_log::CreateExecutionLog;
use imovia_db::models::lead::Lead;
use imovia_db::models::stage::Stage;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The backing store is unreachable or rejected the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

// ---------------------------------------------------------------------------
// AutomationStore
// ---------------------------------------------------------------------------

/// Data access consumed by the transition controller and recorder.
///
/// All methods are single-attempt; callers surface failures rather than
/// retry (the backing operations are assumed idempotent-safe, but the
/// engine issues no retries itself).
#[async_trait]
pub trait AutomationStore: Send + Sync {
    /// Fetch a lead by id.
    async fn lead_by_id(&self, lead_id: DbId) -> Result<Option<Lead>, StoreError>;

    /// Fetch a stage by id.
    async fn stage_by_id(&self, stage_id: DbId) -> Result<Option<Stage>, StoreError>;

    /// Reassign a lead's stage (and pipeline, defensively).
    ///
    /// Returns the updated lead, or `None` if the lead no longer exists.
    async fn update_lead_stage(
        &self,
        lead_id: DbId,
        pipeline_id: DbId,
        stage_id: DbId,
    ) -> Result<Option<Lead>, StoreError>;

    /// List a pipeline's automation rules in store order.
    async fn list_rules_for_pipeline(
        &self,
        pipeline_id: DbId,
    ) -> Result<Vec<AutomationRule>, StoreError>;

    /// Append one execution record to the audit trail.
    async fn append_execution_record(
        &self,
        record: CreateExecutionLog,
    ) -> Result<(), StoreError>;
}
