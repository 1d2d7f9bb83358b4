//! Clock port - where "now" comes from.

use chrono::{DateTime, Utc};

/// Supplies the current instant.
///
/// The archival window is evaluated against host wall-clock time; tests
/// substitute a fixed instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
