//! Repository for the `automation_execution_logs` table.
//!
//! Append-only: rows are inserted by the execution recorder and read by the
//! audit views; there is no update or delete path.

use imovia_core::types::DbId;
use sqlx::PgPool;

use crate::models::execution_log::{CreateExecutionLog, ExecutionLog};

/// Column list for automation_execution_logs queries.
const COLUMNS: &str = "id, rule_id, lead_id, status, details, executed_at";

/// Provides data-access methods for automation execution logs.
pub struct ExecutionLogRepo;

impl ExecutionLogRepo {
    /// Record a new execution log entry.
    pub async fn create(
        pool: &PgPool,
        input: &CreateExecutionLog,
    ) -> Result<ExecutionLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO automation_execution_logs (rule_id, lead_id, status, details)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ExecutionLog>(&query)
            .bind(input.rule_id)
            .bind(input.lead_id)
            .bind(&input.status)
            .bind(&input.details)
            .fetch_one(pool)
            .await
    }

    /// List execution logs for a specific rule, newest first.
    pub async fn list_for_rule(
        pool: &PgPool,
        rule_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ExecutionLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM automation_execution_logs
             WHERE rule_id = $1
             ORDER BY executed_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ExecutionLog>(&query)
            .bind(rule_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List execution logs for a specific lead, oldest first (chronological).
    pub async fn list_for_lead(
        pool: &PgPool,
        lead_id: DbId,
    ) -> Result<Vec<ExecutionLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM automation_execution_logs
             WHERE lead_id = $1
             ORDER BY executed_at ASC"
        );
        sqlx::query_as::<_, ExecutionLog>(&query)
            .bind(lead_id)
            .fetch_all(pool)
            .await
    }

    /// Count execution logs for a specific rule.
    pub async fn count_for_rule(pool: &PgPool, rule_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM automation_execution_logs WHERE rule_id = $1",
        )
        .bind(rule_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }
}
