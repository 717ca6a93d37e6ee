//! Polymorphic action dispatch for matched automation rules.
//!
//! One case per [`ActionKind`]: the webhook kind performs a real HTTP call;
//! email, whatsapp, and task are accepted configuration placeholders whose
//! real dispatch lives with the notification integrations outside this
//! system. Every execution returns exactly one [`ExecutionOutcome`] — a
//! failed action never panics and never interrupts the caller's loop over
//! the remaining matched rules.

use imovia_core::automation::{ActionConfig, ActionKind, ExecutionStatus, RuleInput};
use imovia_db::models::lead::Lead;

use crate::webhook::WebhookDelivery;

// ---------------------------------------------------------------------------
// ExecutionOutcome
// ---------------------------------------------------------------------------

/// The result of executing one rule's action for one transition.
#[derive(Debug, Clone)]
pub struct ExecutionOutcome {
    pub status: ExecutionStatus,
    pub details: String,
}

impl ExecutionOutcome {
    fn success(details: String) -> Self {
        Self {
            status: ExecutionStatus::Success,
            details,
        }
    }

    fn error(details: String) -> Self {
        Self {
            status: ExecutionStatus::Error,
            details,
        }
    }
}

// ---------------------------------------------------------------------------
// ActionExecutor
// ---------------------------------------------------------------------------

/// Dispatches a matched rule's action and reports the outcome.
pub struct ActionExecutor {
    webhook: WebhookDelivery,
}

impl ActionExecutor {
    pub fn new() -> Self {
        Self {
            webhook: WebhookDelivery::new(),
        }
    }

    /// Execute `rule`'s action against the lead's post-transition snapshot.
    ///
    /// A malformed action kind or config degrades to an error outcome so
    /// the firing is still recorded exactly once.
    pub async fn execute(&self, rule: &RuleInput, lead: &Lead) -> ExecutionOutcome {
        let kind = match ActionKind::from_str(&rule.action_kind) {
            Ok(kind) => kind,
            Err(e) => {
                tracing::warn!(rule_id = rule.id, error = %e, "Rule has invalid action kind");
                return ExecutionOutcome::error(e.to_string());
            }
        };

        let config = match ActionConfig::from_parts(kind, &rule.action_config) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(rule_id = rule.id, error = %e, "Rule has invalid action config");
                return ExecutionOutcome::error(e.to_string());
            }
        };

        match config {
            ActionConfig::Webhook { url } => {
                let payload = match serde_json::to_value(lead) {
                    Ok(payload) => payload,
                    Err(e) => {
                        return ExecutionOutcome::error(format!(
                            "Failed to serialize lead snapshot: {e}"
                        ))
                    }
                };
                match self.webhook.deliver(&url, &payload).await {
                    Ok(()) => ExecutionOutcome::success(format!("Webhook delivered to {url}")),
                    Err(e) => {
                        tracing::warn!(
                            rule_id = rule.id,
                            url,
                            error = %e,
                            "Webhook delivery failed"
                        );
                        ExecutionOutcome::error(format!("Webhook delivery failed: {e}"))
                    }
                }
            }
            // Placeholder kinds: valid configuration, no external call yet.
            ActionConfig::Email { .. } | ActionConfig::Whatsapp { .. } | ActionConfig::Task { .. } => {
                ExecutionOutcome::success(format!(
                    "{kind} action accepted but not dispatched"
                ))
            }
        }
    }
}

impl Default for ActionExecutor {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
