//! Automation rule domain types and the transition rule matcher.
//!
//! A rule belongs to one pipeline and pairs a trigger condition (from-stage,
//! to-stage, each a concrete stage id or the `"any"` wildcard) with an
//! action. Matching is a fan-out: every active rule whose trigger matches a
//! transition fires, in store order — there is no first-match-wins.
//!
//! Like the stage catalog, [`RuleInput`] is a mirror of the database row so
//! this crate stays independent of the db crate.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Wire-format wildcard for a trigger bound matching every stage.
pub const ANY_WILDCARD: &str = "any";

/// Maximum length of an automation rule name.
pub const MAX_RULE_NAME_LENGTH: usize = 200;

// ---------------------------------------------------------------------------
// ActionKind
// ---------------------------------------------------------------------------

/// The side-effect mechanism an automation rule triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Webhook,
    Email,
    Whatsapp,
    Task,
}

impl ActionKind {
    /// Return the wire-format string for this variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Webhook => "webhook",
            Self::Email => "email",
            Self::Whatsapp => "whatsapp",
            Self::Task => "task",
        }
    }

    /// Parse from a wire-format string.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "webhook" => Ok(Self::Webhook),
            "email" => Ok(Self::Email),
            "whatsapp" => Ok(Self::Whatsapp),
            "task" => Ok(Self::Task),
            _ => Err(CoreError::Validation(format!(
                "Invalid action_kind: '{s}'. Must be one of: webhook, email, whatsapp, task"
            ))),
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ExecutionStatus
// ---------------------------------------------------------------------------

/// The recorded outcome of one rule firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Success,
    Error,
}

impl ExecutionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            _ => Err(CoreError::Validation(format!(
                "Invalid execution status: '{s}'. Must be one of: success, error"
            ))),
        }
    }
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TriggerBound
// ---------------------------------------------------------------------------

/// One side of a trigger condition: a concrete stage id or the wildcard.
///
/// Wire format is the literal string `"any"` or a stage id; the database
/// representation is a nullable column where NULL means wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerBound {
    Any,
    Stage(DbId),
}

impl TriggerBound {
    /// Build from the nullable database column.
    pub fn from_db(value: Option<DbId>) -> Self {
        match value {
            Some(id) => Self::Stage(id),
            None => Self::Any,
        }
    }

    /// Convert to the nullable database column.
    pub fn to_db(&self) -> Option<DbId> {
        match self {
            Self::Any => None,
            Self::Stage(id) => Some(*id),
        }
    }

    /// Parse from a JSON value: `"any"` or a stage id.
    pub fn from_json(value: &Value) -> Result<Self, CoreError> {
        match value {
            Value::String(s) if s == ANY_WILDCARD => Ok(Self::Any),
            Value::Number(n) => n.as_i64().map(Self::Stage).ok_or_else(|| {
                CoreError::Validation(format!("Invalid trigger bound: {n} is not a stage id"))
            }),
            other => Err(CoreError::Validation(format!(
                "Invalid trigger bound: expected \"{ANY_WILDCARD}\" or a stage id, got {other}"
            ))),
        }
    }

    /// Whether this bound matches a stage id.
    ///
    /// The wildcard matches everything, including the absence of a stage
    /// (a lead transitioning from "no stage"). A concrete bound only
    /// matches its exact id — a dangling reference to a deleted or foreign
    /// stage can therefore never match.
    pub fn matches(&self, stage_id: Option<DbId>) -> bool {
        match self {
            Self::Any => true,
            Self::Stage(id) => stage_id == Some(*id),
        }
    }
}

impl Serialize for TriggerBound {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Any => serializer.serialize_str(ANY_WILDCARD),
            Self::Stage(id) => serializer.serialize_i64(*id),
        }
    }
}

impl<'de> Deserialize<'de> for TriggerBound {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Trigger
// ---------------------------------------------------------------------------

/// The (from, to) condition of an automation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    pub from: TriggerBound,
    pub to: TriggerBound,
}

impl Trigger {
    pub fn matches(&self, transition: &Transition) -> bool {
        self.from.matches(transition.from_stage_id) && self.to.matches(Some(transition.to_stage_id))
    }
}

// ---------------------------------------------------------------------------
// Transition
// ---------------------------------------------------------------------------

/// One stage move of one lead. Ephemeral — constructed for the duration of a
/// drag-end and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub lead_id: DbId,
    /// `None` when the lead had no stage before the move.
    pub from_stage_id: Option<DbId>,
    pub to_stage_id: DbId,
}

// ---------------------------------------------------------------------------
// ActionConfig
// ---------------------------------------------------------------------------

/// Typed action payload, keyed by [`ActionKind`].
///
/// The stored config is an open JSON object; parsing it here closes off
/// invalid shapes before dispatch. Extra keys (for example a webhook
/// `secret`) are ignored by the parse and not acted on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionConfig {
    Webhook { url: String },
    Email { subject: String, body: String },
    Whatsapp { phone: String, message: String },
    Task { title: String, due_in_days: Option<i64> },
}

impl ActionConfig {
    /// Parse the stored JSON config for the given action kind.
    ///
    /// Required keys per kind:
    /// - **webhook**: `url`
    /// - **email**: `subject`, `body`
    /// - **whatsapp**: `phone`, `message`
    /// - **task**: `title`
    pub fn from_parts(kind: ActionKind, config: &Value) -> Result<Self, CoreError> {
        let obj = config.as_object().ok_or_else(|| {
            CoreError::Validation("action_config must be a JSON object".to_string())
        })?;

        let required = |key: &str| -> Result<String, CoreError> {
            obj.get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| {
                    CoreError::Validation(format!(
                        "{kind} action config must contain '{key}'"
                    ))
                })
        };

        match kind {
            ActionKind::Webhook => Ok(Self::Webhook {
                url: required("url")?,
            }),
            ActionKind::Email => Ok(Self::Email {
                subject: required("subject")?,
                body: required("body")?,
            }),
            ActionKind::Whatsapp => Ok(Self::Whatsapp {
                phone: required("phone")?,
                message: required("message")?,
            }),
            ActionKind::Task => Ok(Self::Task {
                title: required("title")?,
                due_in_days: obj.get("due_in_days").and_then(Value::as_i64),
            }),
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Webhook { .. } => ActionKind::Webhook,
            Self::Email { .. } => ActionKind::Email,
            Self::Whatsapp { .. } => ActionKind::Whatsapp,
            Self::Task { .. } => ActionKind::Task,
        }
    }
}

/// Validate a stored config without keeping the parsed value.
///
/// Used by the rule CRUD handlers at write time so a rule can only be saved
/// with the keys its action kind requires.
pub fn validate_action_config(kind: ActionKind, config: &Value) -> Result<(), CoreError> {
    ActionConfig::from_parts(kind, config).map(|_| ())
}

/// Validate an automation rule name: non-empty, within length limit.
pub fn validate_rule_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Rule name must not be empty".to_string(),
        ));
    }
    if trimmed.len() > MAX_RULE_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Rule name exceeds maximum length of {MAX_RULE_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// RuleInput
// ---------------------------------------------------------------------------

/// Minimal rule data needed by the matcher and the action executor.
///
/// `action_kind` stays a raw string here: matching does not depend on it,
/// and the executor parses it at dispatch time so a malformed kind degrades
/// to an error outcome instead of preventing the rule from being considered.
#[derive(Debug, Clone)]
pub struct RuleInput {
    pub id: DbId,
    pub pipeline_id: DbId,
    pub name: String,
    pub trigger: Trigger,
    pub action_kind: String,
    pub action_config: Value,
    pub active: bool,
}

// ---------------------------------------------------------------------------
// Matcher
// ---------------------------------------------------------------------------

/// Select the active rules whose trigger matches `transition`, preserving
/// store order.
///
/// Pure function: same inputs always yield the same matched set. All
/// matches are returned — firing is the caller's sequential fan-out.
pub fn matching_rules<'a>(transition: &Transition, rules: &'a [RuleInput]) -> Vec<&'a RuleInput> {
    rules
        .iter()
        .filter(|rule| rule.active && rule.trigger.matches(transition))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rule(id: DbId, from: TriggerBound, to: TriggerBound, active: bool) -> RuleInput {
        RuleInput {
            id,
            pipeline_id: 1,
            name: format!("rule-{id}"),
            trigger: Trigger { from, to },
            action_kind: "webhook".to_string(),
            action_config: json!({ "url": "https://hooks.example.com" }),
            active,
        }
    }

    fn transition(from: Option<DbId>, to: DbId) -> Transition {
        Transition {
            lead_id: 100,
            from_stage_id: from,
            to_stage_id: to,
        }
    }

    // -- ActionKind parsing -------------------------------------------------

    #[test]
    fn action_kind_roundtrip() {
        let pairs = [
            ("webhook", ActionKind::Webhook),
            ("email", ActionKind::Email),
            ("whatsapp", ActionKind::Whatsapp),
            ("task", ActionKind::Task),
        ];
        for (s, variant) in &pairs {
            assert_eq!(&ActionKind::from_str(s).unwrap(), variant);
            assert_eq!(variant.as_str(), *s);
        }
    }

    #[test]
    fn action_kind_invalid_rejects() {
        assert!(ActionKind::from_str("sms").is_err());
    }

    // -- TriggerBound -------------------------------------------------------

    #[test]
    fn trigger_bound_json_wildcard() {
        assert_eq!(
            TriggerBound::from_json(&json!("any")).unwrap(),
            TriggerBound::Any
        );
    }

    #[test]
    fn trigger_bound_json_stage_id() {
        assert_eq!(
            TriggerBound::from_json(&json!(7)).unwrap(),
            TriggerBound::Stage(7)
        );
    }

    #[test]
    fn trigger_bound_json_invalid_rejects() {
        assert!(TriggerBound::from_json(&json!("all")).is_err());
        assert!(TriggerBound::from_json(&json!(1.5)).is_err());
        assert!(TriggerBound::from_json(&json!(null)).is_err());
    }

    #[test]
    fn trigger_bound_serialize() {
        assert_eq!(serde_json::to_value(TriggerBound::Any).unwrap(), json!("any"));
        assert_eq!(serde_json::to_value(TriggerBound::Stage(3)).unwrap(), json!(3));
    }

    #[test]
    fn trigger_bound_db_roundtrip() {
        assert_eq!(TriggerBound::from_db(None), TriggerBound::Any);
        assert_eq!(TriggerBound::from_db(Some(5)), TriggerBound::Stage(5));
        assert_eq!(TriggerBound::Any.to_db(), None);
        assert_eq!(TriggerBound::Stage(5).to_db(), Some(5));
    }

    #[test]
    fn wildcard_matches_absent_stage() {
        assert!(TriggerBound::Any.matches(None));
        assert!(TriggerBound::Any.matches(Some(9)));
        assert!(!TriggerBound::Stage(9).matches(None));
    }

    // -- ActionConfig -------------------------------------------------------

    #[test]
    fn webhook_config_valid() {
        let cfg = ActionConfig::from_parts(
            ActionKind::Webhook,
            &json!({ "url": "https://hooks.example.com/leads" }),
        )
        .unwrap();
        assert_eq!(
            cfg,
            ActionConfig::Webhook {
                url: "https://hooks.example.com/leads".to_string()
            }
        );
    }

    #[test]
    fn webhook_config_missing_url_rejects() {
        assert!(ActionConfig::from_parts(ActionKind::Webhook, &json!({ "method": "POST" })).is_err());
    }

    #[test]
    fn webhook_config_ignores_extra_keys() {
        // A configured secret is not forwarded anywhere; the parse drops it.
        let cfg = ActionConfig::from_parts(
            ActionKind::Webhook,
            &json!({ "url": "https://h.example.com", "secret": "s3cr3t" }),
        )
        .unwrap();
        assert_eq!(cfg.kind(), ActionKind::Webhook);
    }

    #[test]
    fn email_config_requires_subject_and_body() {
        assert!(ActionConfig::from_parts(ActionKind::Email, &json!({ "subject": "Oi" })).is_err());
        assert!(ActionConfig::from_parts(
            ActionKind::Email,
            &json!({ "subject": "Oi", "body": "Novo lead" })
        )
        .is_ok());
    }

    #[test]
    fn whatsapp_config_requires_phone_and_message() {
        assert!(
            ActionConfig::from_parts(ActionKind::Whatsapp, &json!({ "phone": "+5511999999999" }))
                .is_err()
        );
        assert!(ActionConfig::from_parts(
            ActionKind::Whatsapp,
            &json!({ "phone": "+5511999999999", "message": "Olá" })
        )
        .is_ok());
    }

    #[test]
    fn task_config_due_in_days_optional() {
        let cfg =
            ActionConfig::from_parts(ActionKind::Task, &json!({ "title": "Ligar" })).unwrap();
        assert_eq!(
            cfg,
            ActionConfig::Task {
                title: "Ligar".to_string(),
                due_in_days: None
            }
        );

        let cfg = ActionConfig::from_parts(
            ActionKind::Task,
            &json!({ "title": "Ligar", "due_in_days": 2 }),
        )
        .unwrap();
        assert_eq!(
            cfg,
            ActionConfig::Task {
                title: "Ligar".to_string(),
                due_in_days: Some(2)
            }
        );
    }

    #[test]
    fn config_non_object_rejects() {
        assert!(ActionConfig::from_parts(ActionKind::Webhook, &json!("just a url")).is_err());
    }

    // -- validate_rule_name -------------------------------------------------

    #[test]
    fn valid_rule_name() {
        assert!(validate_rule_name("Notificar ganho").is_ok());
    }

    #[test]
    fn empty_rule_name_rejects() {
        assert!(validate_rule_name("").is_err());
        assert!(validate_rule_name("  ").is_err());
    }

    #[test]
    fn too_long_rule_name_rejects() {
        let long = "a".repeat(MAX_RULE_NAME_LENGTH + 1);
        assert!(validate_rule_name(&long).is_err());
    }

    // -- Matcher ------------------------------------------------------------

    #[test]
    fn exact_trigger_matches() {
        let rules = vec![rule(1, TriggerBound::Stage(10), TriggerBound::Stage(12), true)];
        let matched = matching_rules(&transition(Some(10), 12), &rules);
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn exact_trigger_wrong_target_does_not_match() {
        let rules = vec![rule(1, TriggerBound::Stage(10), TriggerBound::Stage(12), true)];
        assert!(matching_rules(&transition(Some(10), 11), &rules).is_empty());
    }

    #[test]
    fn full_wildcard_matches_every_transition() {
        let rules = vec![rule(1, TriggerBound::Any, TriggerBound::Any, true)];
        assert_eq!(matching_rules(&transition(Some(10), 11), &rules).len(), 1);
        assert_eq!(matching_rules(&transition(None, 12), &rules).len(), 1);
    }

    #[test]
    fn inactive_rules_never_match() {
        let rules = vec![rule(1, TriggerBound::Any, TriggerBound::Any, false)];
        assert!(matching_rules(&transition(Some(10), 11), &rules).is_empty());
    }

    #[test]
    fn fan_out_returns_all_matches_in_store_order() {
        let rules = vec![
            rule(3, TriggerBound::Stage(10), TriggerBound::Stage(11), true),
            rule(4, TriggerBound::Any, TriggerBound::Stage(11), true),
            rule(5, TriggerBound::Stage(99), TriggerBound::Stage(11), true),
        ];
        let matched = matching_rules(&transition(Some(10), 11), &rules);
        let ids: Vec<DbId> = matched.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 4]);
    }

    #[test]
    fn dangling_stage_reference_never_matches() {
        // Stage 999 no longer exists; the equality test simply never passes.
        let rules = vec![rule(1, TriggerBound::Stage(999), TriggerBound::Any, true)];
        assert!(matching_rules(&transition(Some(10), 11), &rules).is_empty());
    }

    #[test]
    fn matcher_is_idempotent() {
        let rules = vec![
            rule(1, TriggerBound::Any, TriggerBound::Stage(11), true),
            rule(2, TriggerBound::Stage(10), TriggerBound::Any, true),
        ];
        let t = transition(Some(10), 11);
        let first: Vec<DbId> = matching_rules(&t, &rules).iter().map(|r| r.id).collect();
        let second: Vec<DbId> = matching_rules(&t, &rules).iter().map(|r| r.id).collect();
        assert_eq!(first, second);
    }
}
