//! Pipeline and stage catalog domain types.
//!
//! A pipeline is one workflow variant (e.g. "Venda", "Locação") made of an
//! ordered list of stages. The catalog here is a mirror of the database rows
//! so that this crate stays independent of the db crate; the api layer
//! converts rows into [`StageDef`]s before handing them to the board or the
//! transition guards.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a pipeline or stage name.
pub const MAX_NAME_LENGTH: usize = 120;

/// Maximum number of stages a single pipeline may hold.
pub const MAX_STAGES_PER_PIPELINE: usize = 50;

// ---------------------------------------------------------------------------
// StageDef
// ---------------------------------------------------------------------------

/// Minimal stage data needed by the board projection and transition guards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageDef {
    pub id: DbId,
    pub pipeline_id: DbId,
    pub name: String,
    pub sort_order: i32,
    pub color: Option<String>,
    pub required: bool,
}

// ---------------------------------------------------------------------------
// StageCatalog
// ---------------------------------------------------------------------------

/// The ordered stage list of one pipeline.
///
/// Column order on the board is `sort_order` ascending; construction sorts
/// once so callers can rely on iteration order.
#[derive(Debug, Clone)]
pub struct StageCatalog {
    pipeline_id: DbId,
    stages: Vec<StageDef>,
}

impl StageCatalog {
    /// Build a catalog from stage rows, keeping only stages of `pipeline_id`
    /// and sorting them by `sort_order`.
    pub fn new(pipeline_id: DbId, mut stages: Vec<StageDef>) -> Self {
        stages.retain(|s| s.pipeline_id == pipeline_id);
        stages.sort_by_key(|s| s.sort_order);
        Self {
            pipeline_id,
            stages,
        }
    }

    pub fn pipeline_id(&self) -> DbId {
        self.pipeline_id
    }

    /// Stages in board column order.
    pub fn stages(&self) -> &[StageDef] {
        &self.stages
    }

    /// Whether `stage_id` belongs to this pipeline's catalog.
    pub fn contains(&self, stage_id: DbId) -> bool {
        self.stages.iter().any(|s| s.id == stage_id)
    }

    /// Look up a stage by id.
    pub fn stage(&self, stage_id: DbId) -> Option<&StageDef> {
        self.stages.iter().find(|s| s.id == stage_id)
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a pipeline or stage name: non-empty, within length limit.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Name must not be empty".to_string(),
        ));
    }
    if trimmed.len() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Name exceeds maximum length of {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate that sort_order is non-negative.
pub fn validate_sort_order(order: i32) -> Result<(), CoreError> {
    if order < 0 {
        return Err(CoreError::Validation(format!(
            "sort_order must be non-negative, got {order}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(id: DbId, pipeline_id: DbId, sort: i32) -> StageDef {
        StageDef {
            id,
            pipeline_id,
            name: format!("stage-{id}"),
            sort_order: sort,
            color: None,
            required: false,
        }
    }

    #[test]
    fn catalog_sorts_by_sort_order() {
        let catalog = StageCatalog::new(1, vec![stage(10, 1, 3), stage(11, 1, 1), stage(12, 1, 2)]);
        let ids: Vec<DbId> = catalog.stages().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![11, 12, 10]);
    }

    #[test]
    fn catalog_drops_foreign_pipeline_stages() {
        let catalog = StageCatalog::new(1, vec![stage(10, 1, 0), stage(20, 2, 0)]);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains(10));
        assert!(!catalog.contains(20));
    }

    #[test]
    fn catalog_lookup() {
        let catalog = StageCatalog::new(1, vec![stage(10, 1, 0)]);
        assert_eq!(catalog.stage(10).map(|s| s.id), Some(10));
        assert!(catalog.stage(99).is_none());
    }

    #[test]
    fn empty_catalog() {
        let catalog = StageCatalog::new(1, vec![]);
        assert!(catalog.is_empty());
        assert!(!catalog.contains(1));
    }

    #[test]
    fn valid_name() {
        assert!(validate_name("Qualificação").is_ok());
    }

    #[test]
    fn empty_name_rejects() {
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
    }

    #[test]
    fn too_long_name_rejects() {
        let long = "a".repeat(MAX_NAME_LENGTH + 1);
        assert!(validate_name(&long).is_err());
    }

    #[test]
    fn valid_sort_orders() {
        assert!(validate_sort_order(0).is_ok());
        assert!(validate_sort_order(42).is_ok());
    }

    #[test]
    fn negative_sort_order_rejects() {
        assert!(validate_sort_order(-1).is_err());
    }
}
