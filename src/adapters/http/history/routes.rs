//! HTTP routes for the draw archive.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{check_history, list_history, HistoryAppState};

/// Creates the history router with all routes.
pub fn history_routes(state: HistoryAppState) -> Router {
    Router::new()
        // GET /api/twodhistory
        .route("/api/twodhistory", get(list_history))
        // POST /api/twodhistory/check
        .route("/api/twodhistory/check", post(check_history))
        .with_state(state)
}
