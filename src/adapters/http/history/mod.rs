//! HTTP adapter for the draw archive.
//!
//! Endpoints:
//! - `GET /api/twodhistory` - All archived draws, newest first
//! - `POST /api/twodhistory/check` - Archive a draw unless its date exists

mod dto;
mod handlers;
mod routes;

pub use dto::CheckHistoryResponse;
pub use handlers::{check_history, list_history, HistoryAppState};
pub use routes::history_routes;
