//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Archive database URL must use the postgres:// or postgresql:// scheme")]
    InvalidDatabaseUrl,

    #[error("Archive pool size must be between 1 and {max}, got {got}")]
    InvalidPoolSize { got: u32, max: u32 },

    #[error("Archive acquire timeout must be at least one second")]
    InvalidAcquireTimeout,

    #[error("Mailbox capacity must be at least 1")]
    InvalidMailboxCapacity,

    #[error("Archive offset must be within ±18 hours")]
    InvalidArchiveOffset,

    #[error("Invalid archive window: {0}")]
    InvalidArchiveWindow(String),
}
