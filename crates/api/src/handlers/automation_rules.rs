//! Handlers for automation rules and their execution logs.
//!
//! Rules are created and edited through the builder UI; the engine consumes
//! them read-only. Write-time validation closes off names, action kinds,
//! and config shapes, but deliberately does NOT verify that trigger stage
//! ids belong to the rule's pipeline — a dangling reference is legal and
//! simply never matches.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use imovia_core::automation::{self, ActionKind};
use imovia_core::error::CoreError;
use imovia_core::paging::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use imovia_core::types::DbId;
use imovia_db::models::automation_rule::{
    AutomationRule, AutomationRuleFilter, CreateAutomationRule, UpdateAutomationRule,
};
use imovia_db::repositories::{AutomationRuleRepo, ExecutionLogRepo, LeadRepo};

use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for toggling a rule's active flag.
#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub active: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Verify that a rule exists, returning the full row.
async fn ensure_rule_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<AutomationRule> {
    AutomationRuleRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "AutomationRule",
                id,
            })
        })
}

// ---------------------------------------------------------------------------
// POST /automation-rules
// ---------------------------------------------------------------------------

/// Create a new automation rule.
pub async fn create_rule(
    State(state): State<AppState>,
    Json(body): Json<CreateAutomationRule>,
) -> AppResult<impl IntoResponse> {
    automation::validate_rule_name(&body.name)?;
    let kind = ActionKind::from_str(&body.action_kind)?;
    automation::validate_action_config(kind, &body.action_config)?;

    let rule = AutomationRuleRepo::create(&state.pool, &body).await?;

    tracing::info!(
        rule_id = rule.id,
        pipeline_id = rule.pipeline_id,
        action_kind = %rule.action_kind,
        "Automation rule created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: rule })))
}

// ---------------------------------------------------------------------------
// GET /automation-rules
// ---------------------------------------------------------------------------

/// List rules with optional filtering by pipeline and active status.
pub async fn list_rules(
    State(state): State<AppState>,
    Query(filter): Query<AutomationRuleFilter>,
) -> AppResult<impl IntoResponse> {
    let rules = AutomationRuleRepo::list(&state.pool, &filter).await?;

    tracing::debug!(count = rules.len(), "Listed automation rules");

    Ok(Json(DataResponse { data: rules }))
}

// ---------------------------------------------------------------------------
// GET /automation-rules/{id}
// ---------------------------------------------------------------------------

/// Get a single rule by ID.
pub async fn get_rule(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let rule = ensure_rule_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: rule }))
}

// ---------------------------------------------------------------------------
// PUT /automation-rules/{id}
// ---------------------------------------------------------------------------

/// Update an existing rule.
pub async fn update_rule(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateAutomationRule>,
) -> AppResult<impl IntoResponse> {
    let existing = ensure_rule_exists(&state.pool, id).await?;

    if let Some(ref name) = body.name {
        automation::validate_rule_name(name)?;
    }

    // Validate the config against whichever action kind the rule will have
    // after the patch.
    let kind_str = body.action_kind.as_deref().unwrap_or(&existing.action_kind);
    let kind = ActionKind::from_str(kind_str)?;
    let config = body.action_config.as_ref().unwrap_or(&existing.action_config);
    automation::validate_action_config(kind, config)?;

    let updated = AutomationRuleRepo::update(&state.pool, id, &body)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "AutomationRule",
                id,
            })
        })?;

    tracing::info!(rule_id = id, "Automation rule updated");

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// DELETE /automation-rules/{id}
// ---------------------------------------------------------------------------

/// Delete a rule.
pub async fn delete_rule(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = AutomationRuleRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "AutomationRule",
            id,
        }));
    }

    tracing::info!(rule_id = id, "Automation rule deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// PATCH /automation-rules/{id}/toggle
// ---------------------------------------------------------------------------

/// Toggle a rule's active flag.
pub async fn toggle_rule(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<ToggleRequest>,
) -> AppResult<impl IntoResponse> {
    let toggled = AutomationRuleRepo::toggle_active(&state.pool, id, body.active).await?;
    if !toggled {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "AutomationRule",
            id,
        }));
    }

    tracing::info!(rule_id = id, active = body.active, "Automation rule toggled");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// GET /automation-rules/{id}/logs
// ---------------------------------------------------------------------------

/// List a rule's execution logs, newest first.
pub async fn list_rule_logs(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    ensure_rule_exists(&state.pool, id).await?;

    let limit = clamp_limit(pagination.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(pagination.offset);

    let logs = ExecutionLogRepo::list_for_rule(&state.pool, id, limit, offset).await?;
    Ok(Json(DataResponse { data: logs }))
}

// ---------------------------------------------------------------------------
// GET /leads/{id}/automation-logs
// ---------------------------------------------------------------------------

/// List a lead's execution logs in chronological order.
pub async fn list_lead_logs(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if LeadRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Lead",
            id,
        }));
    }

    let logs = ExecutionLogRepo::list_for_lead(&state.pool, id).await?;
    Ok(Json(DataResponse { data: logs }))
}
