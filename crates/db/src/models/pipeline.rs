//! Pipeline models and DTOs.

use imovia_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A pipeline row from the `pipelines` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Pipeline {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for creating a new pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePipeline {
    pub name: String,
}
