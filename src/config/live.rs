//! Live draw configuration

use chrono::Duration;
use serde::Deserialize;

use crate::application::live::{LiveServiceConfig, DEFAULT_COOLDOWN_SECS, DEFAULT_MAILBOX_CAPACITY};
use crate::domain::lottery::ArchivalWindow;

use super::error::ValidationError;

/// Largest civil offset from UTC, in minutes.
const MAX_OFFSET_MINUTES: u32 = 18 * 60;

/// Live streaming and archival configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LiveConfig {
    /// Pending snapshots per stream subscriber before updates are dropped
    #[serde(default = "default_mailbox_capacity")]
    pub mailbox_capacity: usize,

    /// Draw-local offset from UTC in minutes (390 = UTC+06:30)
    #[serde(default = "default_archive_offset")]
    pub archive_offset_minutes: i32,

    /// Local start of the archival window, `HH:MM`
    #[serde(default = "default_archive_window_start")]
    pub archive_window_start: String,

    /// Length of the archival window in minutes
    #[serde(default = "default_archive_window_minutes")]
    pub archive_window_minutes: u32,

    /// Minimum seconds between archival attempts
    #[serde(default = "default_archive_cooldown")]
    pub archive_cooldown_secs: u32,
}

impl LiveConfig {
    /// Build the archival window described by this section
    pub fn archival_window(&self) -> Result<ArchivalWindow, ValidationError> {
        if self.archive_offset_minutes.unsigned_abs() > MAX_OFFSET_MINUTES {
            return Err(ValidationError::InvalidArchiveOffset);
        }
        let start = ArchivalWindow::parse_start(&self.archive_window_start)
            .map_err(|e| ValidationError::InvalidArchiveWindow(e.to_string()))?;
        ArchivalWindow::new(self.archive_offset_minutes, start, self.archive_window_minutes)
            .map_err(|e| ValidationError::InvalidArchiveWindow(e.to_string()))
    }

    /// Settings for the live draw service
    pub fn service_config(&self) -> Result<LiveServiceConfig, ValidationError> {
        Ok(LiveServiceConfig {
            mailbox_capacity: self.mailbox_capacity,
            archival_window: self.archival_window()?,
            archival_cooldown: Duration::seconds(i64::from(self.archive_cooldown_secs)),
        })
    }

    /// Validate live configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.mailbox_capacity == 0 {
            return Err(ValidationError::InvalidMailboxCapacity);
        }
        self.archival_window()?;
        Ok(())
    }
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: default_mailbox_capacity(),
            archive_offset_minutes: default_archive_offset(),
            archive_window_start: default_archive_window_start(),
            archive_window_minutes: default_archive_window_minutes(),
            archive_cooldown_secs: default_archive_cooldown(),
        }
    }
}

fn default_mailbox_capacity() -> usize {
    DEFAULT_MAILBOX_CAPACITY
}

fn default_archive_offset() -> i32 {
    6 * 60 + 30
}

fn default_archive_window_start() -> String {
    "16:30".to_string()
}

fn default_archive_window_minutes() -> u32 {
    5
}

fn default_archive_cooldown() -> u32 {
    DEFAULT_COOLDOWN_SECS as u32
}
