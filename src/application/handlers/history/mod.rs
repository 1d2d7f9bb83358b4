//! History handlers - manual archival check, bulk import and archive listing.

mod check_history;
mod import_history;
mod list_history;

pub use check_history::{
    CheckHistoryCommand, CheckHistoryError, CheckHistoryHandler, CheckHistoryResult,
};
pub use import_history::{ImportHistoryCommand, ImportHistoryHandler, ImportHistoryReport};
pub use list_history::{ListHistoryHandler, ListHistoryQuery};
