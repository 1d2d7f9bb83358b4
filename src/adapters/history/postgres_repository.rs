//! PostgreSQL implementation of HistorySink and HistoryReader.
//!
//! Persists archived draws to the `twodhistory` table. The unique
//! constraint on `date` makes inserts idempotent without a
//! check-then-insert round trip.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use crate::config::DatabaseConfig;
use crate::domain::lottery::HistoryRecord;
use crate::ports::{HistoryError, HistoryReader, HistorySink, InsertOutcome};

/// Open a connection pool and, if configured, apply pending migrations.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, HistoryError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect(&config.url)
        .await
        .map_err(|e| HistoryError::Database(format!("Failed to connect: {}", e)))?;

    if config.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| HistoryError::Database(format!("Failed to run migrations: {}", e)))?;
        tracing::info!("History migrations applied");
    }

    Ok(pool)
}

/// PostgreSQL implementation of the history ports.
#[derive(Clone)]
pub struct PostgresHistoryRepository {
    pool: PgPool,
}

impl PostgresHistoryRepository {
    /// Creates a new PostgresHistoryRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistorySink for PostgresHistoryRepository {
    async fn insert_if_absent(&self, record: &HistoryRecord) -> Result<InsertOutcome, HistoryError> {
        record
            .validate()
            .map_err(|e| HistoryError::InvalidRecord(e.to_string()))?;

        let result = sqlx::query(
            r#"
            INSERT INTO twodhistory (
                date, set1200, value1200, result1200,
                set430, value430, result430,
                modern930, internet930, modern200, internet200
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (date) DO NOTHING
            "#,
        )
        .bind(&record.date)
        .bind(&record.set_1200)
        .bind(&record.value_1200)
        .bind(&record.result_1200)
        .bind(&record.set_430)
        .bind(&record.value_430)
        .bind(&record.result_430)
        .bind(&record.modern_930)
        .bind(&record.internet_930)
        .bind(&record.modern_200)
        .bind(&record.internet_200)
        .execute(&self.pool)
        .await
        .map_err(|e| HistoryError::Database(format!("Failed to insert history: {}", e)))?;

        if result.rows_affected() == 0 {
            Ok(InsertOutcome::AlreadyExists)
        } else {
            Ok(InsertOutcome::Inserted)
        }
    }
}

#[async_trait]
impl HistoryReader for PostgresHistoryRepository {
    async fn list_all(&self) -> Result<Vec<HistoryRecord>, HistoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, date, set1200, value1200, result1200,
                   set430, value430, result430,
                   modern930, internet930, modern200, internet200,
                   created_at
            FROM twodhistory
            ORDER BY date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| HistoryError::Database(format!("Failed to query history: {}", e)))?;

        rows.iter().map(row_to_record).collect()
    }
}

fn row_to_record(row: &PgRow) -> Result<HistoryRecord, HistoryError> {
    let text = |column: &str| -> Result<String, HistoryError> {
        row.try_get(column)
            .map_err(|e| HistoryError::Database(format!("Failed to read {}: {}", column, e)))
    };

    Ok(HistoryRecord {
        id: row
            .try_get("id")
            .map_err(|e| HistoryError::Database(format!("Failed to read id: {}", e)))?,
        date: text("date")?,
        set_1200: text("set1200")?,
        value_1200: text("value1200")?,
        result_1200: text("result1200")?,
        set_430: text("set430")?,
        value_430: text("value430")?,
        result_430: text("result430")?,
        modern_930: text("modern930")?,
        internet_930: text("internet930")?,
        modern_200: text("modern200")?,
        internet_200: text("internet200")?,
        created_at: row
            .try_get("created_at")
            .map_err(|e| HistoryError::Database(format!("Failed to read created_at: {}", e)))?,
    })
}
