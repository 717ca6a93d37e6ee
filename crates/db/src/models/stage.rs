//! Stage models and DTOs.

use imovia_core::pipeline::StageDef;
use imovia_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stage row from the `stages` table.
///
/// Stage rows carry no timestamps; they are edited only through the
/// pipeline settings screens and referenced by id everywhere else.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Stage {
    pub id: DbId,
    pub pipeline_id: DbId,
    pub name: String,
    pub sort_order: i32,
    pub color: Option<String>,
    pub required: bool,
}

impl Stage {
    /// Convert to the core mirror used by the catalog and board projection.
    pub fn to_def(&self) -> StageDef {
        StageDef {
            id: self.id,
            pipeline_id: self.pipeline_id,
            name: self.name.clone(),
            sort_order: self.sort_order,
            color: self.color.clone(),
            required: self.required,
        }
    }
}

/// Input for creating a new stage.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStage {
    pub pipeline_id: DbId,
    pub name: String,
    pub sort_order: Option<i32>,
    pub color: Option<String>,
    pub required: Option<bool>,
}
