//! HTTP handlers for the live draw endpoints.

use std::convert::Infallible;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header;
use axum::response::sse::{Event, Sse};
use axum::response::{IntoResponse, Json};
use futures::stream::{self, Stream};

use crate::application::live::{LiveDrawService, StreamSession};
use crate::domain::lottery::Snapshot;

use super::super::error::ApiError;
use super::dto::{CurrentResponse, UpdateResponse};

/// Shared state for the live routes.
#[derive(Clone)]
pub struct LiveAppState {
    pub live: Arc<LiveDrawService>,
}

impl LiveAppState {
    pub fn new(live: Arc<LiveDrawService>) -> Self {
        Self { live }
    }
}

/// POST /api/lottery/update - Replace the current snapshot and broadcast it
///
/// The body is parsed by hand so that every malformed payload is a 400,
/// including well-formed JSON of the wrong shape.
pub async fn update_lottery(
    State(state): State<LiveAppState>,
    body: Bytes,
) -> Result<Json<UpdateResponse>, ApiError> {
    let snapshot: Snapshot = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "Rejected malformed lottery update");
        ApiError::from(e)
    })?;

    let outcome = state.live.submit(snapshot.clone()).await;
    tracing::debug!(archival = ?outcome.archival, "Lottery update processed");

    Ok(Json(UpdateResponse::accepted(snapshot)))
}

/// GET /api/lottery/current - Current snapshot with live viewer count
pub async fn current_lottery(State(state): State<LiveAppState>) -> Json<CurrentResponse> {
    Json(CurrentResponse::new(state.live.current().await))
}

/// GET /api/lottery/stream - Server-Sent Events stream of snapshots
///
/// The session is owned by the response stream; when the client goes away
/// the stream is dropped and the session unregisters itself.
pub async fn stream_lottery(State(state): State<LiveAppState>) -> impl IntoResponse {
    let session = state.live.subscribe().await;

    (
        [
            (header::CACHE_CONTROL, "no-cache"),
            (header::CONNECTION, "keep-alive"),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        ],
        Sse::new(frames(session)),
    )
}

fn frames(session: StreamSession) -> impl Stream<Item = Result<Event, Infallible>> {
    stream::unfold(session, |mut session| async move {
        let payload = session.next_frame().await?;
        let event = Event::default().data(&*payload);
        Some((Ok::<_, Infallible>(event), session))
    })
}
