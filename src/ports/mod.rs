//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the live core and the outside world. Adapters implement these ports.
//!
//! ## History Ports
//!
//! - `HistorySink` - Idempotent, date-keyed archival of settled draws
//! - `HistoryReader` - Read access to archived draws
//!
//! ## Time
//!
//! - `Clock` - Source of the current instant for the ingest path

mod clock;
mod history_reader;
mod history_sink;

pub use clock::Clock;
pub use history_reader::HistoryReader;
pub use history_sink::{HistoryError, HistorySink, InsertOutcome};
