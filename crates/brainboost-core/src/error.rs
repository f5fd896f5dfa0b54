//! Core error types for brainboost-core.
//!
//! A small thiserror hierarchy: storage and validation failures roll up
//! into [`CoreError`], which every fallible public operation returns.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for brainboost-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Persistence-related errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from the slot key-value store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to resolve or create the data directory
    #[error("Failed to prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a slot file
    #[error("Failed to read slot '{slot}': {source}")]
    ReadFailed {
        slot: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a slot file
    #[error("Failed to write slot '{slot}': {source}")]
    WriteFailed {
        slot: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize a slot value
    #[error("Failed to encode slot '{slot}': {source}")]
    EncodeFailed {
        slot: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Record construction errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A required text field was empty
    #[error("Field '{0}' must not be empty")]
    EmptyField(&'static str),

    /// Session duration must be a positive number of minutes
    #[error("Session duration must be greater than zero, got {0}")]
    NonPositiveDuration(u32),

    /// Goal progress is a percentage
    #[error("Goal progress must be within 0-100, got {0}")]
    ProgressOutOfRange(u8),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
