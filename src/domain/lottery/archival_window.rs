//! ArchivalWindow - the local wall-clock range in which a settled draw is archived.
//!
//! Local time is a fixed civil offset from UTC with no daylight-saving
//! rules. The default is Myanmar time (UTC+06:30) with the window opening
//! at 16:30 for five minutes, right after the evening result is announced.

use chrono::{DateTime, FixedOffset, NaiveTime, Timelike, Utc};

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Minute-granular half-open window `[start, start + length)` in local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchivalWindow {
    offset_minutes: i32,
    start_minute: u32,
    length_minutes: u32,
}

impl ArchivalWindow {
    /// UTC+06:30, 16:30 up to but excluding 16:35.
    pub const MYANMAR_EVENING: ArchivalWindow = ArchivalWindow {
        offset_minutes: 6 * 60 + 30,
        start_minute: 16 * 60 + 30,
        length_minutes: 5,
    };

    /// Creates a window; it must be non-empty and must not cross local midnight.
    ///
    /// The offset is not checked here; an unusable offset surfaces from
    /// [`ArchivalWindow::local_time`].
    pub fn new(
        offset_minutes: i32,
        start: NaiveTime,
        length_minutes: u32,
    ) -> Result<Self, ValidationError> {
        if length_minutes == 0 {
            return Err(ValidationError::invalid_format(
                "archive_window_minutes",
                "window must be at least one minute long",
            ));
        }
        let start_minute = start.hour() * 60 + start.minute();
        if start_minute.saturating_add(length_minutes) > MINUTES_PER_DAY {
            return Err(ValidationError::invalid_format(
                "archive_window_minutes",
                "window must not cross local midnight",
            ));
        }
        Ok(Self {
            offset_minutes,
            start_minute,
            length_minutes,
        })
    }

    /// Parses an `HH:MM` start time.
    pub fn parse_start(value: &str) -> Result<NaiveTime, ValidationError> {
        NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|e| {
            ValidationError::invalid_format("archive_window_start", format!("expected HH:MM: {}", e))
        })
    }

    pub fn offset_minutes(&self) -> i32 {
        self.offset_minutes
    }

    /// Converts a UTC instant to the window's local civil time.
    pub fn local_time(&self, now: DateTime<Utc>) -> Result<DateTime<FixedOffset>, DomainError> {
        let offset = self
            .offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::TimezoneUnavailable, "UTC offset is out of range")
                    .with_detail("offset_minutes", self.offset_minutes.to_string())
            })?;
        Ok(now.with_timezone(&offset))
    }

    /// True when the local time falls inside the window.
    pub fn contains_local(&self, local: &DateTime<FixedOffset>) -> bool {
        let minute_of_day = local.hour() * 60 + local.minute();
        minute_of_day >= self.start_minute
            && minute_of_day < self.start_minute + self.length_minutes
    }
}

impl Default for ArchivalWindow {
    fn default() -> Self {
        Self::MYANMAR_EVENING
    }
}
