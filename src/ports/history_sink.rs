//! HistorySink port - Interface for archiving a settled draw.
//!
//! The live core calls this once a draw is final. The same date may be
//! submitted more than once (repeated updates inside the archival window,
//! manual checks, process restarts), so implementations MUST be idempotent
//! on the date key.

use async_trait::async_trait;

use crate::domain::lottery::HistoryRecord;

/// Errors that can occur in history storage operations.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// Database communication error
    #[error("Database error: {0}")]
    Database(String),

    /// Record failed validation before reaching the store
    #[error("Invalid history record: {0}")]
    InvalidRecord(String),
}

/// Result of attempting to archive a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Record was inserted (first time seeing this date).
    Inserted,
    /// A record for this date already exists; nothing was written.
    AlreadyExists,
}

/// Port for date-keyed, insert-if-absent archival.
///
/// Implementations should rely on a uniqueness constraint on the date
/// (`ON CONFLICT DO NOTHING`) rather than a check-then-insert sequence so
/// concurrent callers cannot create duplicates.
#[async_trait]
pub trait HistorySink: Send + Sync {
    /// Insert the record unless one already exists for its date.
    ///
    /// A second call for the same date returns `AlreadyExists`, never an error.
    async fn insert_if_absent(&self, record: &HistoryRecord) -> Result<InsertOutcome, HistoryError>;
}
