//! Repository for the `stages` table.

use imovia_core::types::DbId;
use sqlx::PgPool;

use crate::models::stage::{CreateStage, Stage};

/// Column list for stages queries.
const COLUMNS: &str = "id, pipeline_id, name, sort_order, color, required";

/// Provides data-access methods for pipeline stages.
pub struct StageRepo;

impl StageRepo {
    /// Insert a new stage, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateStage) -> Result<Stage, sqlx::Error> {
        let query = format!(
            "INSERT INTO stages (pipeline_id, name, sort_order, color, required)
             VALUES ($1, $2, COALESCE($3, 0), $4, COALESCE($5, false))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Stage>(&query)
            .bind(input.pipeline_id)
            .bind(&input.name)
            .bind(input.sort_order)
            .bind(&input.color)
            .bind(input.required)
            .fetch_one(pool)
            .await
    }

    /// Find a stage by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Stage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stages WHERE id = $1");
        sqlx::query_as::<_, Stage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the stages of a pipeline in board column order.
    pub async fn list_for_pipeline(
        pool: &PgPool,
        pipeline_id: DbId,
    ) -> Result<Vec<Stage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM stages WHERE pipeline_id = $1 ORDER BY sort_order ASC"
        );
        sqlx::query_as::<_, Stage>(&query)
            .bind(pipeline_id)
            .fetch_all(pool)
            .await
    }
}
