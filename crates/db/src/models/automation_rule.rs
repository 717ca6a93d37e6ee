//! Automation rule models and DTOs.
//!
//! The trigger bounds are stored as nullable stage-id columns where NULL is
//! the `"any"` wildcard; [`AutomationRule::to_input`] converts a row into the
//! core mirror consumed by the matcher and executor.

use imovia_core::automation::{RuleInput, Trigger, TriggerBound};
use imovia_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// An automation rule row from the `automation_rules` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AutomationRule {
    pub id: DbId,
    pub pipeline_id: DbId,
    pub name: String,
    pub trigger_from_stage_id: Option<DbId>,
    pub trigger_to_stage_id: Option<DbId>,
    pub action_kind: String,
    pub action_config: serde_json::Value,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AutomationRule {
    /// The typed trigger condition of this rule.
    pub fn trigger(&self) -> Trigger {
        Trigger {
            from: TriggerBound::from_db(self.trigger_from_stage_id),
            to: TriggerBound::from_db(self.trigger_to_stage_id),
        }
    }

    /// Convert to the core mirror used by the matcher and action executor.
    pub fn to_input(&self) -> RuleInput {
        RuleInput {
            id: self.id,
            pipeline_id: self.pipeline_id,
            name: self.name.clone(),
            trigger: self.trigger(),
            action_kind: self.action_kind.clone(),
            action_config: self.action_config.clone(),
            active: self.active,
        }
    }
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for creating a new automation rule.
///
/// The trigger arrives in wire format (`"any"` or a stage id per bound) and
/// is stored as nullable columns.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAutomationRule {
    pub pipeline_id: DbId,
    pub name: String,
    pub trigger: Trigger,
    pub action_kind: String,
    pub action_config: serde_json::Value,
    pub active: Option<bool>,
}

// ---------------------------------------------------------------------------
// Update DTO
// ---------------------------------------------------------------------------

/// Input for updating an existing automation rule. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAutomationRule {
    pub name: Option<String>,
    pub trigger: Option<Trigger>,
    pub action_kind: Option<String>,
    pub action_config: Option<serde_json::Value>,
    pub active: Option<bool>,
}

// ---------------------------------------------------------------------------
// Query filter
// ---------------------------------------------------------------------------

/// Query parameters for filtering automation rules.
#[derive(Debug, Clone, Deserialize)]
pub struct AutomationRuleFilter {
    pub pipeline_id: Option<DbId>,
    pub active: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn row_trigger_null_is_wildcard() {
        let rule = AutomationRule {
            id: 1,
            pipeline_id: 2,
            name: "r".to_string(),
            trigger_from_stage_id: None,
            trigger_to_stage_id: Some(7),
            action_kind: "webhook".to_string(),
            action_config: json!({ "url": "https://h.example.com" }),
            active: true,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let trigger = rule.trigger();
        assert_eq!(trigger.from, TriggerBound::Any);
        assert_eq!(trigger.to, TriggerBound::Stage(7));
    }

    #[test]
    fn create_dto_parses_wire_trigger() {
        let body = json!({
            "pipeline_id": 1,
            "name": "Notificar ganho",
            "trigger": { "from": "any", "to": 3 },
            "action_kind": "webhook",
            "action_config": { "url": "https://h.example.com" }
        });

        let dto: CreateAutomationRule = serde_json::from_value(body).unwrap();
        assert_eq!(dto.trigger.from, TriggerBound::Any);
        assert_eq!(dto.trigger.to, TriggerBound::Stage(3));
        assert_eq!(dto.active, None);
    }
}
