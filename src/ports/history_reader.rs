//! HistoryReader port - read side of the archived draws.

use async_trait::async_trait;

use crate::domain::lottery::HistoryRecord;

use super::HistoryError;

/// Port for listing archived draws.
#[async_trait]
pub trait HistoryReader: Send + Sync {
    /// All archived records, newest date first.
    async fn list_all(&self) -> Result<Vec<HistoryRecord>, HistoryError>;
}
