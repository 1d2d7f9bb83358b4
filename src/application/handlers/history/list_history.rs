//! ListHistoryHandler - Query handler for the archive.

use std::sync::Arc;

use crate::domain::lottery::HistoryRecord;
use crate::ports::{HistoryError, HistoryReader};

/// Query for every archived draw.
#[derive(Debug, Clone, Default)]
pub struct ListHistoryQuery;

/// Handler for listing archived draws, newest date first.
pub struct ListHistoryHandler {
    reader: Arc<dyn HistoryReader>,
}

impl ListHistoryHandler {
    pub fn new(reader: Arc<dyn HistoryReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, _query: ListHistoryQuery) -> Result<Vec<HistoryRecord>, HistoryError> {
        self.reader.list_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct MockReader {
        records: Vec<HistoryRecord>,
        fail: bool,
    }

    #[async_trait]
    impl HistoryReader for MockReader {
        async fn list_all(&self) -> Result<Vec<HistoryRecord>, HistoryError> {
            if self.fail {
                return Err(HistoryError::Database("timeout".to_string()));
            }
            Ok(self.records.clone())
        }
    }

    fn record(date: &str) -> HistoryRecord {
        HistoryRecord {
            date: date.to_string(),
            ..HistoryRecord::default()
        }
    }

    #[tokio::test]
    async fn returns_reader_records_unchanged() {
        let reader = MockReader {
            records: vec![record("2024-01-16"), record("2024-01-15")],
            fail: false,
        };
        let handler = ListHistoryHandler::new(Arc::new(reader));

        let records = handler.handle(ListHistoryQuery).await.unwrap();

        let dates: Vec<_> = records.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-16", "2024-01-15"]);
    }

    #[tokio::test]
    async fn propagates_reader_failure() {
        let reader = MockReader {
            records: Vec::new(),
            fail: true,
        };
        let handler = ListHistoryHandler::new(Arc::new(reader));

        assert!(handler.handle(ListHistoryQuery).await.is_err());
    }
}
