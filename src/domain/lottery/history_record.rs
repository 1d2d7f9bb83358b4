//! HistoryRecord - one archived day of results, unique by date.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

use super::{is_placeholder, Snapshot};

/// Archived results for a single draw date.
///
/// `id` and `created_at` are assigned by the store and omitted from
/// inbound payloads.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    pub date: String,

    #[serde(rename = "1200set")]
    pub set_1200: String,
    #[serde(rename = "1200value")]
    pub value_1200: String,
    #[serde(rename = "1200")]
    pub result_1200: String,

    #[serde(rename = "430set")]
    pub set_430: String,
    #[serde(rename = "430value")]
    pub value_430: String,
    #[serde(rename = "430")]
    pub result_430: String,

    #[serde(rename = "930modern")]
    pub modern_930: String,
    #[serde(rename = "930internet")]
    pub internet_930: String,
    #[serde(rename = "200modern")]
    pub modern_200: String,
    #[serde(rename = "200internet")]
    pub internet_200: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl HistoryRecord {
    /// The date is the unique key; everything else is free-form.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.date.trim().is_empty() {
            return Err(ValidationError::empty_field("date"));
        }
        Ok(())
    }

    /// True when the noon session never published, e.g. a `----.--` set
    /// index or a `--` result. Such days are not worth keeping.
    pub fn is_incomplete(&self) -> bool {
        let set = self.set_1200.trim();
        set.chars().all(|c| c == '-' || c == '.') || is_placeholder(&self.result_1200)
    }
}

impl From<&Snapshot> for HistoryRecord {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            id: None,
            date: snapshot.date.clone(),
            set_1200: snapshot.set_1200.clone(),
            value_1200: snapshot.value_1200.clone(),
            result_1200: snapshot.result_1200.clone(),
            set_430: snapshot.set_430.clone(),
            value_430: snapshot.value_430.clone(),
            result_430: snapshot.result_430.clone(),
            modern_930: snapshot.modern_930.clone(),
            internet_930: snapshot.internet_930.clone(),
            modern_200: snapshot.modern_200.clone(),
            internet_200: snapshot.internet_200.clone(),
            created_at: None,
        }
    }
}
