//! Core error types for examplan-core.
//!
//! The recommendation engine itself never fails: every input-shape anomaly
//! degrades to a neutral default. The error hierarchy below covers the
//! peripheral concerns only (storage, configuration, catalog mutation,
//! notification delivery).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for examplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Catalog storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog mutation/validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Notification delivery errors
    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Catalog-file storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to read the catalog file
    #[error("Failed to read catalog at {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the catalog file
    #[error("Failed to write catalog at {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog file is not valid JSON matching the schema
    #[error("Failed to parse catalog at {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Catalog could not be serialized
    #[error("Failed to serialize catalog: {0}")]
    SerializeFailed(#[source] serde_json::Error),

    /// Data directory could not be resolved or created
    #[error("Failed to prepare data directory: {0}")]
    DataDir(String),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Catalog mutation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Subject not present in the catalog
    #[error("Unknown subject: {0}")]
    UnknownSubject(String),

    /// Moment not offered by the subject (or missing from the catalog)
    #[error("Moment '{moment}' is not available for subject '{subject}'")]
    UnknownMoment { subject: String, moment: String },

    /// Subject declares exam types but none was supplied
    #[error("Subject '{0}' requires an exam type")]
    MissingExamType(String),

    /// No confirmed slot matched the given date and time
    #[error("No slot on {date} at {time} for subject '{subject}'")]
    SlotNotFound {
        subject: String,
        date: chrono::NaiveDate,
        time: String,
    },

    /// Exam has no confirmed slots to evaluate
    #[error("Exam for subject '{0}' has no candidate slots")]
    NoCandidateSlots(String),
}

/// Notification delivery errors.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Webhook URL missing or malformed
    #[error("Invalid webhook URL: {0}")]
    InvalidUrl(String),

    /// HTTP request failed
    #[error("Webhook request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Webhook endpoint rejected the payload
    #[error("Webhook rejected notification (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
