//! History adapters - where archived draws live.
//!
//! - `PostgresHistoryRepository` - durable store keyed on a unique date
//! - `InMemoryHistoryRepository` - process-local fallback when no database
//!   is configured or reachable

mod in_memory_repository;
mod postgres_repository;

pub use in_memory_repository::InMemoryHistoryRepository;
pub use postgres_repository::{connect, PostgresHistoryRepository};
