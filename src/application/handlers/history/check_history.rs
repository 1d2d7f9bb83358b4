//! CheckHistoryHandler - Command handler for manually archiving a draw.
//!
//! Used by operators to backfill a day the live gate missed. Inserting an
//! existing date is a success, not a conflict.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::ValidationError;
use crate::domain::lottery::HistoryRecord;
use crate::ports::{HistoryError, HistorySink, InsertOutcome};

/// Command to archive a record unless its date is already present.
#[derive(Debug, Clone)]
pub struct CheckHistoryCommand {
    pub record: HistoryRecord,
}

/// Result of a manual check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckHistoryResult {
    pub date: String,
    pub outcome: InsertOutcome,
}

#[derive(Debug, Error)]
pub enum CheckHistoryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] HistoryError),
}

/// Handler for manual history checks.
pub struct CheckHistoryHandler {
    sink: Arc<dyn HistorySink>,
}

impl CheckHistoryHandler {
    pub fn new(sink: Arc<dyn HistorySink>) -> Self {
        Self { sink }
    }

    pub async fn handle(
        &self,
        cmd: CheckHistoryCommand,
    ) -> Result<CheckHistoryResult, CheckHistoryError> {
        cmd.record.validate()?;

        let outcome = self.sink.insert_if_absent(&cmd.record).await?;
        match outcome {
            InsertOutcome::Inserted => {
                tracing::info!(date = %cmd.record.date, "Inserted history record")
            }
            InsertOutcome::AlreadyExists => {
                tracing::info!(date = %cmd.record.date, "History already exists, skipping insert")
            }
        }

        Ok(CheckHistoryResult {
            date: cmd.record.date,
            outcome,
        })
    }
}
