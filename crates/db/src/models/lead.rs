//! Lead models and DTOs.
//!
//! The stage column keeps its legacy database name `etapa_id`; repository
//! queries alias it to `stage_id` for the row struct, and serialization
//! renames it back so the webhook payload and the API both expose
//! `"etapa_id"` — the row serialization IS the webhook wire contract.

use imovia_core::board::BoardItem;
use imovia_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A lead row from the `leads` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Lead {
    pub id: DbId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub property_interest: Option<String>,
    pub budget: Option<f64>,
    pub source: Option<String>,
    pub notes: Option<String>,
    pub pipeline_id: Option<DbId>,
    #[serde(rename = "etapa_id")]
    pub stage_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl BoardItem for Lead {
    fn pipeline_id(&self) -> Option<DbId> {
        self.pipeline_id
    }

    fn stage_id(&self) -> Option<DbId> {
        self.stage_id
    }
}

/// Input for creating a new lead.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLead {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub property_interest: Option<String>,
    pub budget: Option<f64>,
    pub source: Option<String>,
    pub notes: Option<String>,
    pub pipeline_id: Option<DbId>,
    #[serde(rename = "etapa_id")]
    pub stage_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lead_serializes_stage_as_etapa_id() {
        let lead = Lead {
            id: 1,
            name: "Maria Souza".to_string(),
            email: Some("maria@example.com".to_string()),
            phone: None,
            property_interest: Some("Apartamento 2 quartos".to_string()),
            budget: Some(450_000.0),
            source: None,
            notes: None,
            pipeline_id: Some(2),
            stage_id: Some(3),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let value = serde_json::to_value(&lead).unwrap();
        assert_eq!(value["etapa_id"], 3);
        assert_eq!(value["pipeline_id"], 2);
        assert!(value.get("stage_id").is_none());
    }
}
