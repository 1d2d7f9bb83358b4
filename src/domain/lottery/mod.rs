//! Lottery module - The live draw snapshot and its archival rules.
//!
//! - [`Snapshot`] - The single current draw state pushed to subscribers
//! - [`HistoryRecord`] - The per-date archived form of a settled snapshot
//! - [`ArchivalWindow`] - Fixed-offset local-time window for archival

mod archival_window;
mod history_record;
mod snapshot;

pub use archival_window::ArchivalWindow;
pub use history_record::HistoryRecord;
pub use snapshot::{is_placeholder, Snapshot, UPDATE_TIME_FORMAT};
