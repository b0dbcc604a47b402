//! Core error types for univreminder-core.
//!
//! Each collaborator of the sync pipeline gets its own thiserror enum;
//! [`SyncError`] is the single terminal error a run reports.

use std::path::PathBuf;
use thiserror::Error;

/// Terminal error of one sync run. Every stage failure aborts the whole run.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The reminder sink refused write access. Nothing was fetched.
    #[error("Reminder access denied: {0}")]
    AccessDenied(String),

    /// The remote task list could not be fetched or decoded.
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// The known-id file could not be loaded.
    #[error("Known-id store error: {0}")]
    KnownIds(#[from] KnownIdError),

    /// Creating or committing reminders failed. No ids were marked known.
    #[error("Reminder sink error: {0}")]
    Sink(#[from] SinkError),

    /// Reminders were committed but the known-id set could not be written.
    /// The next run may recreate these reminders.
    #[error("{created} reminder(s) created but known ids were not saved: {source}")]
    Persist {
        created: usize,
        #[source]
        source: KnownIdError,
    },
}

/// Errors from the remote task fetch.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Missing or unusable credentials.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Non-2xx response.
    #[error("Canvas API error: HTTP {status}")]
    Http { status: u16 },

    /// Response body did not match the expected task shape.
    #[error("Failed to decode planner items: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured base URL cannot form a request URL.
    #[error("Invalid Canvas URL: {0}")]
    InvalidUrl(String),

    /// Transport failure before a response was received.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Errors from the durable known-id set.
#[derive(Error, Debug)]
pub enum KnownIdError {
    /// The file or its directory could not be read or created.
    #[error("Failed to initialize known ids at {path}: {source}")]
    Init {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file contains something other than comma-separated integers.
    #[error("Corrupt known-id file {path}: unexpected value '{value}'")]
    Corrupt { path: PathBuf, value: String },

    /// The atomic rewrite failed.
    #[error("Failed to write known ids to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by a reminder sink.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Failed to create reminder: {0}")]
    Create(String),

    #[error("Failed to commit reminders: {0}")]
    Commit(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not exist in the configuration schema
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Missing required configuration key
    #[error("Missing required configuration key: {0}")]
    MissingKey(String),

    /// Data directory could not be resolved or created
    #[error("Failed to access data directory: {0}")]
    DataDir(String),
}

/// Result type alias for SyncError
pub type Result<T, E = SyncError> = std::result::Result<T, E>;
