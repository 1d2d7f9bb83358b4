//! HTTP routes for the live draw endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{current_lottery, stream_lottery, update_lottery, LiveAppState};

/// Creates the live router with all routes.
pub fn live_routes(state: LiveAppState) -> Router {
    Router::new()
        // POST /api/lottery/update
        .route("/api/lottery/update", post(update_lottery))
        // GET /api/lottery/current
        .route("/api/lottery/current", get(current_lottery))
        // GET /api/lottery/stream
        .route("/api/lottery/stream", get(stream_lottery))
        .with_state(state)
}
