//! HTTP handlers for the draw archive.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::response::Json;

use crate::application::handlers::{
    CheckHistoryCommand, CheckHistoryHandler, ListHistoryHandler, ListHistoryQuery,
};
use crate::domain::lottery::HistoryRecord;
use crate::ports::{HistoryReader, HistorySink};

use super::super::error::ApiError;
use super::dto::CheckHistoryResponse;

/// Shared state containing history dependencies.
#[derive(Clone)]
pub struct HistoryAppState {
    pub sink: Arc<dyn HistorySink>,
    pub reader: Arc<dyn HistoryReader>,
}

impl HistoryAppState {
    pub fn new(sink: Arc<dyn HistorySink>, reader: Arc<dyn HistoryReader>) -> Self {
        Self { sink, reader }
    }

    pub fn check_history_handler(&self) -> CheckHistoryHandler {
        CheckHistoryHandler::new(self.sink.clone())
    }

    pub fn list_history_handler(&self) -> ListHistoryHandler {
        ListHistoryHandler::new(self.reader.clone())
    }
}

/// GET /api/twodhistory - All archived draws, newest date first
pub async fn list_history(
    State(state): State<HistoryAppState>,
) -> Result<Json<Vec<HistoryRecord>>, ApiError> {
    let records = state.list_history_handler().handle(ListHistoryQuery).await?;
    Ok(Json(records))
}

/// POST /api/twodhistory/check - Archive a draw unless its date exists
pub async fn check_history(
    State(state): State<HistoryAppState>,
    body: Bytes,
) -> Result<Json<CheckHistoryResponse>, ApiError> {
    let record: HistoryRecord = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "Rejected malformed history check");
        ApiError::from(e)
    })?;

    let result = state
        .check_history_handler()
        .handle(CheckHistoryCommand { record })
        .await?;

    Ok(Json(CheckHistoryResponse::checked(result.date)))
}
