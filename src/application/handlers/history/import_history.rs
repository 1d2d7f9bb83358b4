//! ImportHistoryHandler - Bulk backfill of past draws into the archive.
//!
//! Days whose noon session never published are skipped. Existing dates are
//! left untouched, so re-running an import is harmless. A failing record is
//! logged and counted; the rest of the batch still goes through.

use std::sync::Arc;

use crate::domain::lottery::HistoryRecord;
use crate::ports::{HistorySink, InsertOutcome};

/// Command carrying the records to backfill, in file order.
#[derive(Debug, Clone)]
pub struct ImportHistoryCommand {
    pub records: Vec<HistoryRecord>,
}

/// Per-batch tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportHistoryReport {
    pub inserted: usize,
    pub already_present: usize,
    /// Noon session missing.
    pub skipped_incomplete: usize,
    /// Rejected by validation, e.g. a blank date.
    pub invalid: usize,
    /// The sink returned an error.
    pub failed: usize,
}

impl ImportHistoryReport {
    pub fn processed(&self) -> usize {
        self.inserted + self.already_present + self.skipped_incomplete + self.invalid + self.failed
    }
}

/// Handler for bulk history imports.
pub struct ImportHistoryHandler {
    sink: Arc<dyn HistorySink>,
}

impl ImportHistoryHandler {
    pub fn new(sink: Arc<dyn HistorySink>) -> Self {
        Self { sink }
    }

    pub async fn handle(&self, cmd: ImportHistoryCommand) -> ImportHistoryReport {
        let mut report = ImportHistoryReport::default();

        for record in &cmd.records {
            if record.is_incomplete() {
                report.skipped_incomplete += 1;
                continue;
            }
            if let Err(e) = record.validate() {
                tracing::warn!(error = %e, "Skipping invalid history record");
                report.invalid += 1;
                continue;
            }

            match self.sink.insert_if_absent(record).await {
                Ok(InsertOutcome::Inserted) => report.inserted += 1,
                Ok(InsertOutcome::AlreadyExists) => report.already_present += 1,
                Err(e) => {
                    tracing::warn!(date = %record.date, error = %e, "Failed to import history record");
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            inserted = report.inserted,
            already_present = report.already_present,
            skipped_incomplete = report.skipped_incomplete,
            invalid = report.invalid,
            failed = report.failed,
            "History import finished"
        );
        report
    }
}
