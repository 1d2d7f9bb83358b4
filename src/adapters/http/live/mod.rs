//! HTTP adapter for the live draw endpoints.
//!
//! Endpoints:
//! - `POST /api/lottery/update` - Replace the current snapshot
//! - `GET /api/lottery/current` - Current snapshot with viewer count
//! - `GET /api/lottery/stream` - Server-Sent Events stream of snapshots

mod dto;
mod handlers;
mod routes;

pub use dto::{CurrentResponse, UpdateResponse};
pub use handlers::{current_lottery, stream_lottery, update_lottery, LiveAppState};
pub use routes::live_routes;
