//! The drag-interaction lifecycle: validate, persist, automate.
//!
//! One gesture runs Idle → Dragging → Resolving → (Committed | RolledBack)
//! → Idle. `on_drag_start` records the dragged lead; `on_drag_end` resolves
//! the drop target, applies the guards, persists the stage move, and — only
//! after persistence succeeds — runs the automation loop sequentially over
//! the matched rules.
//!
//! Gestures are independent and keyed by lead id: a second drag may begin
//! while an earlier one is still persisting. Two gestures on the same lead
//! are last-resolved-wins at the persistence layer — an accepted race, not
//! something the controller serializes.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use imovia_core::automation::{matching_rules, ExecutionStatus, RuleInput, Transition};
use imovia_core::types::{DbId, Timestamp};
use imovia_db::models::lead::Lead;
use imovia_db::models::stage::Stage;

use crate::executor::ActionExecutor;
use crate::recorder::ExecutionRecorder;
use crate::store::{AutomationStore, StoreError};

// ---------------------------------------------------------------------------
// Outcome types
// ---------------------------------------------------------------------------

/// Why a drag-end was discarded without touching persistence.
///
/// Discards are normal no-ops, not errors — the UI simply snaps the card
/// back with no message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscardReason {
    /// No drag-start was recorded for this lead.
    NoActiveDrag,
    /// The dragged lead does not exist.
    UnknownLead,
    /// The dragged lead is not assigned to any pipeline.
    LeadOffBoard,
    /// The drop target resolved to neither a stage nor a lead card.
    NoDropTarget,
    /// The resolved target equals the lead's current stage.
    SameStage,
    /// The resolved stage belongs to a different pipeline.
    StageOutsidePipeline,
}

/// One rule firing within a committed transition, as surfaced to the UI.
#[derive(Debug, Clone, Serialize)]
pub struct RuleFiring {
    pub rule_id: DbId,
    pub rule_name: String,
    pub status: ExecutionStatus,
    pub details: String,
}

/// Terminal state of one drag gesture.
#[derive(Debug, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum TransitionOutcome {
    /// The gesture was a no-op; nothing was persisted or evaluated.
    Discarded { reason: DiscardReason },
    /// The stage move persisted and automation ran for it.
    Committed {
        transition: Transition,
        firings: Vec<RuleFiring>,
    },
    /// Persistence failed; the UI must revert its optimistic move.
    RolledBack { message: String },
}

// ---------------------------------------------------------------------------
// TransitionController
// ---------------------------------------------------------------------------

/// An in-flight drag gesture.
#[derive(Debug, Clone)]
struct DragGesture {
    started_at: Timestamp,
}

/// Owns the drag lifecycle and the automation that follows a committed
/// stage move.
pub struct TransitionController<S> {
    store: Arc<S>,
    executor: ActionExecutor,
    recorder: ExecutionRecorder<S>,
    drags: Mutex<HashMap<DbId, DragGesture>>,
}

impl<S: AutomationStore> TransitionController<S> {
    pub fn new(store: Arc<S>) -> Self {
        let recorder = ExecutionRecorder::new(Arc::clone(&store));
        Self {
            store,
            executor: ActionExecutor::new(),
            recorder,
            drags: Mutex::new(HashMap::new()),
        }
    }

    /// Record a drag-start on a lead card.
    ///
    /// A repeated start for the same lead overwrites the earlier gesture.
    pub async fn on_drag_start(&self, lead_id: DbId) {
        let gesture = DragGesture {
            started_at: chrono::Utc::now(),
        };
        self.drags.lock().await.insert(lead_id, gesture);
        tracing::debug!(lead_id, "Drag started");
    }

    /// Resolve a drag-end into a transition outcome.
    ///
    /// `over_target_id` is either a stage id or a lead id (a card drop
    /// re-targets to that card's column); `None` means the card was dropped
    /// outside any target.
    ///
    /// Store read failures before the persistence attempt propagate as
    /// errors; a failed persistence attempt itself is reported as
    /// [`TransitionOutcome::RolledBack`].
    pub async fn on_drag_end(
        &self,
        lead_id: DbId,
        over_target_id: Option<DbId>,
    ) -> Result<TransitionOutcome, StoreError> {
        let gesture = self.drags.lock().await.remove(&lead_id);
        let Some(gesture) = gesture else {
            return Ok(TransitionOutcome::Discarded {
                reason: DiscardReason::NoActiveDrag,
            });
        };

        let Some(over_id) = over_target_id else {
            return Ok(TransitionOutcome::Discarded {
                reason: DiscardReason::NoDropTarget,
            });
        };

        let Some(lead) = self.store.lead_by_id(lead_id).await? else {
            return Ok(TransitionOutcome::Discarded {
                reason: DiscardReason::UnknownLead,
            });
        };

        let Some(pipeline_id) = lead.pipeline_id else {
            return Ok(TransitionOutcome::Discarded {
                reason: DiscardReason::LeadOffBoard,
            });
        };

        let Some(target) = self.resolve_drop_target(over_id).await? else {
            return Ok(TransitionOutcome::Discarded {
                reason: DiscardReason::NoDropTarget,
            });
        };

        // Guards: a same-stage drop or a stage from another pipeline is
        // silently discarded — no persistence, no automation.
        if lead.stage_id == Some(target.id) {
            return Ok(TransitionOutcome::Discarded {
                reason: DiscardReason::SameStage,
            });
        }
        if target.pipeline_id != pipeline_id {
            return Ok(TransitionOutcome::Discarded {
                reason: DiscardReason::StageOutsidePipeline,
            });
        }

        let transition = Transition {
            lead_id,
            from_stage_id: lead.stage_id,
            to_stage_id: target.id,
        };

        let updated = match self
            .store
            .update_lead_stage(lead_id, pipeline_id, target.id)
            .await
        {
            Ok(Some(updated)) => updated,
            Ok(None) => {
                tracing::warn!(lead_id, "Lead vanished during drag; transition rolled back");
                return Ok(TransitionOutcome::RolledBack {
                    message: "Lead no longer exists".to_string(),
                });
            }
            Err(e) => {
                tracing::warn!(lead_id, error = %e, "Stage persistence failed; transition rolled back");
                return Ok(TransitionOutcome::RolledBack {
                    message: e.to_string(),
                });
            }
        };

        tracing::info!(
            lead_id,
            pipeline_id,
            from_stage = ?transition.from_stage_id,
            to_stage = transition.to_stage_id,
            drag_ms = (chrono::Utc::now() - gesture.started_at).num_milliseconds(),
            "Stage transition committed"
        );

        let firings = self.run_automation(pipeline_id, &transition, &updated).await;
        Ok(TransitionOutcome::Committed { transition, firings })
    }

    /// Resolve a drop target id to a stage.
    ///
    /// Stage ids win over lead ids; a lead card re-targets to the stage it
    /// currently sits in.
    async fn resolve_drop_target(&self, over_id: DbId) -> Result<Option<Stage>, StoreError> {
        if let Some(stage) = self.store.stage_by_id(over_id).await? {
            return Ok(Some(stage));
        }
        if let Some(card) = self.store.lead_by_id(over_id).await? {
            if let Some(stage_id) = card.stage_id {
                return self.store.stage_by_id(stage_id).await;
            }
        }
        Ok(None)
    }

    /// Evaluate and fire the automation rules matching a committed
    /// transition.
    ///
    /// Rules fire one at a time in matcher order; one rule's failure has no
    /// effect on whether the remaining rules are attempted, and every
    /// matched rule produces exactly one execution record.
    async fn run_automation(
        &self,
        pipeline_id: DbId,
        transition: &Transition,
        updated: &Lead,
    ) -> Vec<RuleFiring> {
        let rules: Vec<RuleInput> = match self.store.list_rules_for_pipeline(pipeline_id).await {
            Ok(rows) => rows.iter().map(|r| r.to_input()).collect(),
            Err(e) => {
                // The transition is already committed; automation degrades
                // to zero firings rather than failing the gesture.
                tracing::error!(
                    pipeline_id,
                    lead_id = transition.lead_id,
                    error = %e,
                    "Failed to load automation rules; skipping evaluation"
                );
                return Vec::new();
            }
        };

        let matched = matching_rules(transition, &rules);
        let mut firings = Vec::with_capacity(matched.len());

        for rule in matched {
            let outcome = self.executor.execute(rule, updated).await;
            self.recorder
                .record(rule.id, transition.lead_id, &outcome)
                .await;

            if outcome.status == ExecutionStatus::Error {
                tracing::warn!(
                    rule_id = rule.id,
                    rule_name = %rule.name,
                    lead_id = transition.lead_id,
                    details = %outcome.details,
                    "Automation rule failed"
                );
            }

            firings.push(RuleFiring {
                rule_id: rule.id,
                rule_name: rule.name.clone(),
                status: outcome.status,
                details: outcome.details,
            });
        }

        firings
    }
}
