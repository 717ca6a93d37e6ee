//! Route definitions for automation rules and execution logs.
//!
//! ```text
//! RULES:
//! POST   /                      create_rule
//! GET    /                      list_rules (?pipeline_id, active, limit, offset)
//! GET    /{id}                  get_rule
//! PUT    /{id}                  update_rule
//! DELETE /{id}                  delete_rule
//! PATCH  /{id}/toggle           toggle_rule
//! GET    /{id}/logs             list_rule_logs (?limit, offset)
//!
//! LEAD LOGS (merged into /leads):
//! GET    /{id}/automation-logs  list_lead_logs
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::automation_rules;
use crate::state::AppState;

/// Rule routes — mounted at `/automation-rules`.
pub fn rules_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(automation_rules::create_rule).get(automation_rules::list_rules),
        )
        .route(
            "/{id}",
            get(automation_rules::get_rule)
                .put(automation_rules::update_rule)
                .delete(automation_rules::delete_rule),
        )
        .route(
            "/{id}/toggle",
            axum::routing::patch(automation_rules::toggle_rule),
        )
        .route("/{id}/logs", get(automation_rules::list_rule_logs))
}

/// Lead audit routes — merged into the `/leads` nest.
pub fn lead_logs_router() -> Router<AppState> {
    Router::new().route(
        "/{id}/automation-logs",
        get(automation_rules::list_lead_logs),
    )
}
