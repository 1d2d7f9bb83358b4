//! HTTP adapters - REST and SSE endpoints.
//!
//! Each route group has its own state and router; [`api_router`] merges
//! them and applies the cross-cutting layers.

mod dto;
mod error;
mod health;
pub mod history;
pub mod live;

pub use dto::ErrorResponse;
pub use error::ApiError;
pub use health::{health_routes, HealthResponse};
pub use history::{history_routes, HistoryAppState};
pub use live::{live_routes, LiveAppState};

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the full API router.
pub fn api_router(live: LiveAppState, history: HistoryAppState, cors: CorsLayer) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(live_routes(live))
        .merge(history_routes(history))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// CORS policy for browser clients.
///
/// An empty origin list allows any origin. Origins that are not valid
/// header values are skipped with a warning.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
