//! In-memory history repository.
//!
//! Keeps records in a date-ordered map for the lifetime of the process.
//! Used when the server runs without a database; nothing survives a
//! restart.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::lottery::HistoryRecord;
use crate::ports::{HistoryError, HistoryReader, HistorySink, InsertOutcome};

#[derive(Debug, Default)]
struct Inner {
    records: BTreeMap<String, HistoryRecord>,
    next_id: i64,
}

/// Process-local implementation of both history ports.
#[derive(Debug, Default)]
pub struct InMemoryHistoryRepository {
    inner: RwLock<Inner>,
}

impl InMemoryHistoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl HistorySink for InMemoryHistoryRepository {
    async fn insert_if_absent(&self, record: &HistoryRecord) -> Result<InsertOutcome, HistoryError> {
        record
            .validate()
            .map_err(|e| HistoryError::InvalidRecord(e.to_string()))?;

        let mut inner = self.inner.write().await;
        if inner.records.contains_key(&record.date) {
            return Ok(InsertOutcome::AlreadyExists);
        }

        inner.next_id += 1;
        let stored = HistoryRecord {
            id: Some(inner.next_id),
            created_at: Some(Utc::now()),
            ..record.clone()
        };
        inner.records.insert(record.date.clone(), stored);
        Ok(InsertOutcome::Inserted)
    }
}

#[async_trait]
impl HistoryReader for InMemoryHistoryRepository {
    async fn list_all(&self) -> Result<Vec<HistoryRecord>, HistoryError> {
        let inner = self.inner.read().await;
        Ok(inner.records.values().rev().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn record(date: &str, result: &str) -> HistoryRecord {
        HistoryRecord {
            date: date.to_string(),
            result_430: result.to_string(),
            ..HistoryRecord::default()
        }
    }

    #[tokio::test]
    async fn first_insert_wins() {
        let repo = InMemoryHistoryRepository::new();

        let first = repo.insert_if_absent(&record("2024-01-15", "12")).await.unwrap();
        let second = repo.insert_if_absent(&record("2024-01-15", "99")).await.unwrap();

        assert_eq!(first, InsertOutcome::Inserted);
        assert_eq!(second, InsertOutcome::AlreadyExists);
        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].result_430, "12");
    }

    #[tokio::test]
    async fn assigns_id_and_created_at() {
        let repo = InMemoryHistoryRepository::new();
        repo.insert_if_absent(&record("2024-01-15", "12")).await.unwrap();

        let stored = &repo.list_all().await.unwrap()[0];

        assert_eq!(stored.id, Some(1));
        assert!(stored.created_at.is_some());
    }

    #[tokio::test]
    async fn lists_newest_date_first() {
        let repo = InMemoryHistoryRepository::new();
        for date in ["2024-01-14", "2024-01-16", "2024-01-15"] {
            repo.insert_if_absent(&record(date, "00")).await.unwrap();
        }

        let dates: Vec<_> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.date)
            .collect();

        assert_eq!(dates, vec!["2024-01-16", "2024-01-15", "2024-01-14"]);
    }

    #[tokio::test]
    async fn rejects_blank_date() {
        let repo = InMemoryHistoryRepository::new();

        let result = repo.insert_if_absent(&record("", "12")).await;

        assert!(matches!(result, Err(HistoryError::InvalidRecord(_))));
        assert!(repo.is_empty().await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_inserts_for_same_date_store_one() {
        let repo = Arc::new(InMemoryHistoryRepository::new());

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.insert_if_absent(&record("2024-01-15", "12")).await })
            })
            .collect();

        let mut inserted = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap() == InsertOutcome::Inserted {
                inserted += 1;
            }
        }

        assert_eq!(inserted, 1);
        assert_eq!(repo.len().await, 1);
    }
}
