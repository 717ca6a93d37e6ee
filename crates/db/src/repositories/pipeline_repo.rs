//! Repository for the `pipelines` table.

use imovia_core::types::DbId;
use sqlx::PgPool;

use crate::models::pipeline::{CreatePipeline, Pipeline};

/// Column list for pipelines queries.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides data-access methods for pipelines.
pub struct PipelineRepo;

impl PipelineRepo {
    /// Insert a new pipeline, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePipeline) -> Result<Pipeline, sqlx::Error> {
        let query = format!(
            "INSERT INTO pipelines (name) VALUES ($1) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Pipeline>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find a pipeline by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Pipeline>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pipelines WHERE id = $1");
        sqlx::query_as::<_, Pipeline>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all pipelines, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Pipeline>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pipelines ORDER BY created_at ASC");
        sqlx::query_as::<_, Pipeline>(&query).fetch_all(pool).await
    }
}
