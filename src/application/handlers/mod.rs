//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod history;

pub use history::{
    CheckHistoryCommand, CheckHistoryError, CheckHistoryHandler, CheckHistoryResult,
    ImportHistoryCommand, ImportHistoryHandler, ImportHistoryReport, ListHistoryHandler,
    ListHistoryQuery,
};
