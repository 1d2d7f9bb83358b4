//! Snapshot value object - the current draw state.
//!
//! The JSON field names are the wire format shared with the publishing
//! scraper and the mobile clients, so they are kept exactly as-is
//! (`1200set`, `430`, `viewCount`, ...).

use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Format of the human-readable `updatetime` field.
pub const UPDATE_TIME_FORMAT: &str = "%H:%M:%S %d/%m/%Y";

const TWO_DASH: &str = "--";
const THREE_DASH: &str = "---";

/// The full state of the current day's draw.
///
/// Replaced wholesale on every update; never mutated field-by-field while
/// shared. Missing fields in an inbound payload deserialize as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub date: String,
    pub live: String,
    pub status: String,

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

    #[serde(rename = "updatetime")]
    pub update_time: String,

    /// Number of live stream subscribers, stamped at read/publish time.
    #[serde(rename = "viewCount")]
    pub view_count: usize,
}

impl Snapshot {
    /// The startup snapshot: every code is a placeholder and the draw is off.
    pub fn placeholder<Tz>(at: DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            date: String::new(),
            live: TWO_DASH.to_string(),
            status: "Off".to_string(),
            set_1200: TWO_DASH.to_string(),
            value_1200: TWO_DASH.to_string(),
            result_1200: THREE_DASH.to_string(),
            set_430: TWO_DASH.to_string(),
            value_430: TWO_DASH.to_string(),
            result_430: THREE_DASH.to_string(),
            modern_930: THREE_DASH.to_string(),
            internet_930: THREE_DASH.to_string(),
            modern_200: THREE_DASH.to_string(),
            internet_200: THREE_DASH.to_string(),
            update_time: at.format(UPDATE_TIME_FORMAT).to_string(),
            view_count: 0,
        }
    }

    /// Returns a copy carrying the given viewer count.
    pub fn with_view_count(mut self, view_count: usize) -> Self {
        self.view_count = view_count;
        self
    }

    /// The 16:30 session result, the field that settles the day's draw.
    pub fn evening_result(&self) -> &str {
        &self.result_430
    }

    /// True once the 16:30 result carries a real value.
    pub fn is_settled(&self) -> bool {
        !is_placeholder(self.evening_result())
    }
}

/// True for values that are empty or made only of dashes (`--`, `---`).
pub fn is_placeholder(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed.chars().all(|c| c == '-')
}
