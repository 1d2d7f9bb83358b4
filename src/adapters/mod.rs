//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the live core to external systems:
//! - `clock` - Wall-clock and fixed time sources
//! - `history` - Archive storage (PostgreSQL, in-memory)
//! - `http` - Axum routes for ingest, queries, and SSE streaming

pub mod clock;
pub mod history;
pub mod http;

pub use clock::{FixedClock, SystemClock};
pub use history::{InMemoryHistoryRepository, PostgresHistoryRepository};
