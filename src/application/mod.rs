//! Application layer - the live draw core plus history command/query handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, history writes and reads go through separate handlers.

pub mod handlers;
pub mod live;

pub use handlers::{
    CheckHistoryCommand, CheckHistoryError, CheckHistoryHandler, CheckHistoryResult,
    ImportHistoryCommand, ImportHistoryHandler, ImportHistoryReport, ListHistoryHandler,
    ListHistoryQuery,
};
pub use live::{LiveDrawService, LiveServiceConfig};
