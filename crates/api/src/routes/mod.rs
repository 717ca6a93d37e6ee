pub mod automation_rules;
pub mod board;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /pipelines/{id}/board              board column view
/// /board/drag-start                  drag lifecycle events
/// /board/drag-end
///
/// /automation-rules                  list, create
/// /automation-rules/{id}             get, update, delete
/// /automation-rules/{id}/toggle      toggle active (PATCH)
/// /automation-rules/{id}/logs        execution history
///
/// /leads/{id}/automation-logs        per-lead audit trail
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(board::router())
        .nest("/automation-rules", automation_rules::rules_router())
        .nest("/leads", automation_rules::lead_logs_router())
}
