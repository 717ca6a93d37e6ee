//! Handlers for the pipeline board and the drag interaction surface.
//!
//! The board view is a pure projection recomputed on every request from the
//! stage catalog and the lead collection. The drag endpoints forward to the
//! transition controller, which owns validation, persistence, and the
//! automation that follows a committed move.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use imovia_core::board::board_columns;
use imovia_core::error::CoreError;
use imovia_core::pipeline::StageCatalog;
use imovia_core::types::DbId;
use imovia_db::models::lead::Lead;
use imovia_db::models::pipeline::Pipeline;
use imovia_db::models::stage::Stage;
use imovia_db::repositories::{LeadRepo, PipelineRepo, StageRepo};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// View types
// ---------------------------------------------------------------------------

/// One stage column with its leads, in catalog order.
#[derive(Debug, Serialize)]
pub struct BoardColumnView {
    pub stage: Stage,
    pub leads: Vec<Lead>,
}

/// The full board for one pipeline.
#[derive(Debug, Serialize)]
pub struct BoardView {
    pub pipeline: Pipeline,
    pub columns: Vec<BoardColumnView>,
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for a drag-start event.
#[derive(Debug, Deserialize)]
pub struct DragStartRequest {
    pub lead_id: DbId,
}

/// Request body for a drag-end event.
///
/// `over_target_id` is either a stage id or a lead id (a card drop
/// re-targets to that card's column); absent when the card was dropped
/// outside any target.
#[derive(Debug, Deserialize)]
pub struct DragEndRequest {
    pub lead_id: DbId,
    pub over_target_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// GET /pipelines/{id}/board
// ---------------------------------------------------------------------------

/// Derive the column view for one pipeline.
pub async fn get_board(
    State(state): State<AppState>,
    Path(pipeline_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let pipeline = PipelineRepo::find_by_id(&state.pool, pipeline_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Pipeline",
            id: pipeline_id,
        })?;

    let stages = StageRepo::list_for_pipeline(&state.pool, pipeline_id).await?;
    let leads = LeadRepo::list_for_pipeline(&state.pool, pipeline_id).await?;

    let catalog = StageCatalog::new(pipeline_id, stages.iter().map(Stage::to_def).collect());
    let columns = board_columns(&catalog, &leads);

    // Pair the projected columns back with their full stage rows; both are
    // in catalog order.
    let columns: Vec<BoardColumnView> = columns
        .into_iter()
        .filter_map(|column| {
            stages
                .iter()
                .find(|s| s.id == column.stage_id)
                .cloned()
                .map(|stage| BoardColumnView {
                    stage,
                    leads: column.items.into_iter().cloned().collect(),
                })
        })
        .collect();

    Ok(Json(DataResponse {
        data: BoardView { pipeline, columns },
    }))
}

// ---------------------------------------------------------------------------
// POST /board/drag-start
// ---------------------------------------------------------------------------

/// Record a drag-start on a lead card.
pub async fn drag_start(
    State(state): State<AppState>,
    Json(body): Json<DragStartRequest>,
) -> AppResult<impl IntoResponse> {
    state.controller.on_drag_start(body.lead_id).await;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// POST /board/drag-end
// ---------------------------------------------------------------------------

/// Resolve a drag-end into a transition outcome.
///
/// The response distinguishes committed, discarded, and rolled-back
/// gestures; the client reverts its optimistic move on anything but
/// `committed`.
pub async fn drag_end(
    State(state): State<AppState>,
    Json(body): Json<DragEndRequest>,
) -> AppResult<impl IntoResponse> {
    let outcome = state
        .controller
        .on_drag_end(body.lead_id, body.over_target_id)
        .await?;

    Ok(Json(DataResponse { data: outcome }))
}
