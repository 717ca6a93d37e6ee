//! Route definitions for the pipeline board and drag events.
//!
//! ```text
//! GET  /pipelines/{id}/board    get_board
//! POST /board/drag-start        drag_start
//! POST /board/drag-end          drag_end
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::board;
use crate::state::AppState;

/// Board routes — mounted at the API root.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pipelines/{id}/board", get(board::get_board))
        .route("/board/drag-start", post(board::drag_start))
        .route("/board/drag-end", post(board::drag_end))
}
