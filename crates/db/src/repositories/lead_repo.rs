//! Repository for the `leads` table.
//!
//! The stage column is named `etapa_id` in the schema and aliased to
//! `stage_id` for the row struct.

use imovia_core::types::DbId;
use sqlx::PgPool;

use crate::models::lead::{CreateLead, Lead};

/// Column list for leads queries.
const COLUMNS: &str = "id, name, email, phone, property_interest, budget, source, notes, \
    pipeline_id, etapa_id AS stage_id, created_at, updated_at";

/// Provides data-access methods for leads.
pub struct LeadRepo;

impl LeadRepo {
    /// Insert a new lead, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateLead) -> Result<Lead, sqlx::Error> {
        let query = format!(
            "INSERT INTO leads
                (name, email, phone, property_interest, budget, source, notes,
                 pipeline_id, etapa_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.property_interest)
            .bind(input.budget)
            .bind(&input.source)
            .bind(&input.notes)
            .bind(input.pipeline_id)
            .bind(input.stage_id)
            .fetch_one(pool)
            .await
    }

    /// Find a lead by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leads WHERE id = $1");
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the leads of a pipeline, oldest first.
    ///
    /// This order is what the board preserves within each column.
    pub async fn list_for_pipeline(
        pool: &PgPool,
        pipeline_id: DbId,
    ) -> Result<Vec<Lead>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM leads WHERE pipeline_id = $1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(pipeline_id)
            .fetch_all(pool)
            .await
    }

    /// Reassign a lead's stage (and pipeline, defensively), returning the
    /// updated row, or `None` if the lead does not exist.
    ///
    /// Single UPDATE, last write wins — concurrent editors of other lead
    /// fields are not coordinated with.
    pub async fn update_stage(
        pool: &PgPool,
        lead_id: DbId,
        pipeline_id: DbId,
        stage_id: DbId,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!(
            "UPDATE leads SET pipeline_id = $1, etapa_id = $2, updated_at = now()
             WHERE id = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(pipeline_id)
            .bind(stage_id)
            .bind(lead_id)
            .fetch_optional(pool)
            .await
    }
}
