//! Repository for the `automation_rules` table.

use imovia_core::paging::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use imovia_core::types::DbId;
use sqlx::PgPool;

use crate::models::automation_rule::{
    AutomationRule, AutomationRuleFilter, CreateAutomationRule, UpdateAutomationRule,
};

/// Column list for automation_rules queries.
const COLUMNS: &str = "id, pipeline_id, name, trigger_from_stage_id, trigger_to_stage_id, \
    action_kind, action_config, active, created_at, updated_at";

/// Provides CRUD operations for automation rules.
pub struct AutomationRuleRepo;

impl AutomationRuleRepo {
    /// Insert a new rule, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAutomationRule,
    ) -> Result<AutomationRule, sqlx::Error> {
        let query = format!(
            "INSERT INTO automation_rules
                (pipeline_id, name, trigger_from_stage_id, trigger_to_stage_id,
                 action_kind, action_config, active)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AutomationRule>(&query)
            .bind(input.pipeline_id)
            .bind(&input.name)
            .bind(input.trigger.from.to_db())
            .bind(input.trigger.to.to_db())
            .bind(&input.action_kind)
            .bind(&input.action_config)
            .bind(input.active)
            .fetch_one(pool)
            .await
    }

    /// Find a rule by its primary key.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AutomationRule>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM automation_rules WHERE id = $1");
        sqlx::query_as::<_, AutomationRule>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List rules with optional filtering by pipeline and active status.
    pub async fn list(
        pool: &PgPool,
        filter: &AutomationRuleFilter,
    ) -> Result<Vec<AutomationRule>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 0;

        if filter.pipeline_id.is_some() {
            param_idx += 1;
            conditions.push(format!("pipeline_id = ${param_idx}"));
        }
        if filter.active.is_some() {
            param_idx += 1;
            conditions.push(format!("active = ${param_idx}"));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let limit_val = clamp_limit(filter.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
        let offset_val = clamp_offset(filter.offset);
        param_idx += 1;
        let limit_idx = param_idx;
        param_idx += 1;
        let offset_idx = param_idx;

        let query = format!(
            "SELECT {COLUMNS} FROM automation_rules {where_clause} \
             ORDER BY created_at ASC, id ASC \
             LIMIT ${limit_idx} OFFSET ${offset_idx}"
        );

        let mut q = sqlx::query_as::<_, AutomationRule>(&query);

        if let Some(pid) = filter.pipeline_id {
            q = q.bind(pid);
        }
        if let Some(active) = filter.active {
            q = q.bind(active);
        }

        q = q.bind(limit_val).bind(offset_val);
        q.fetch_all(pool).await
    }

    /// List the rules of one pipeline in store order (creation order).
    ///
    /// This is the order the matcher preserves and the automation loop
    /// fires in.
    pub async fn list_for_pipeline(
        pool: &PgPool,
        pipeline_id: DbId,
    ) -> Result<Vec<AutomationRule>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM automation_rules \
             WHERE pipeline_id = $1 \
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, AutomationRule>(&query)
            .bind(pipeline_id)
            .fetch_all(pool)
            .await
    }

    /// Update an existing rule. Returns the updated row, or `None` if not found.
    ///
    /// The trigger is replaced as a whole when present — partial bound
    /// updates would make "clear to wildcard" inexpressible with COALESCE.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAutomationRule,
    ) -> Result<Option<AutomationRule>, sqlx::Error> {
        let query = format!(
            "UPDATE automation_rules SET
                name                  = COALESCE($1, name),
                trigger_from_stage_id = CASE WHEN $2 THEN $3 ELSE trigger_from_stage_id END,
                trigger_to_stage_id   = CASE WHEN $2 THEN $4 ELSE trigger_to_stage_id END,
                action_kind           = COALESCE($5, action_kind),
                action_config         = COALESCE($6, action_config),
                active                = COALESCE($7, active),
                updated_at            = now()
             WHERE id = $8
             RETURNING {COLUMNS}"
        );
        let trigger = input.trigger;
        sqlx::query_as::<_, AutomationRule>(&query)
            .bind(&input.name)
            .bind(trigger.is_some())
            .bind(trigger.map(|t| t.from.to_db()).flatten())
            .bind(trigger.map(|t| t.to.to_db()).flatten())
            .bind(&input.action_kind)
            .bind(&input.action_config)
            .bind(input.active)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a rule by its ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM automation_rules WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Toggle a rule's active flag. Returns `true` if a row was updated.
    pub async fn toggle_active(pool: &PgPool, id: DbId, active: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE automation_rules SET active = $1, updated_at = now() WHERE id = $2",
        )
        .bind(active)
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
