//! Postgres-backed [`AutomationStore`] over the repository layer.

use async_trait::async_trait;
use sqlx::PgPool;

use imovia_core::types::DbId;
use imovia_db::models::automation_rule::AutomationRule;
use imovia_db::models::execution_log::CreateExecutionLog;
use imovia_db::models::lead::Lead;
use imovia_db::models::stage::Stage;
use imovia_db::repositories::{AutomationRuleRepo, ExecutionLogRepo, LeadRepo, StageRepo};

use crate::store::{AutomationStore, StoreError};

/// Delegates every store operation to the corresponding repository.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AutomationStore for PgStore {
    async fn lead_by_id(&self, lead_id: DbId) -> Result<Option<Lead>, StoreError> {
        Ok(LeadRepo::find_by_id(&self.pool, lead_id).await?)
    }

    async fn stage_by_id(&self, stage_id: DbId) -> Result<Option<Stage>, StoreError> {
        Ok(StageRepo::find_by_id(&self.pool, stage_id).await?)
    }

    async fn update_lead_stage(
        &self,
        lead_id: DbId,
        pipeline_id: DbId,
        stage_id: DbId,
    ) -> Result<Option<Lead>, StoreError> {
        Ok(LeadRepo::update_stage(&self.pool, lead_id, pipeline_id, stage_id).await?)
    }

    async fn list_rules_for_pipeline(
        &self,
        pipeline_id: DbId,
    ) -> Result<Vec<AutomationRule>, StoreError> {
        Ok(AutomationRuleRepo::list_for_pipeline(&self.pool, pipeline_id).await?)
    }

    async fn append_execution_record(
        &self,
        record: CreateExecutionLog,
    ) -> Result<(), StoreError> {
        ExecutionLogRepo::create(&self.pool, &record).await?;
        Ok(())
    }
}
