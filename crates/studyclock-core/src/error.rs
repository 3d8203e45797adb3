//! Core error types for studyclock-core.
//!
//! Defines the error hierarchy using thiserror. Only validation errors are
//! synchronous and user-facing; network and notification failures stay
//! isolated from the timer state machine.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studyclock-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Backend communication errors
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
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

    /// Failed to determine the configuration directory
    #[error("Failed to resolve configuration directory: {0}")]
    DirUnavailable(String),
}

/// Validation errors. Rejected at the settings boundary; never mutate state.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Unknown settings key
    #[error("Unknown settings key: {0}")]
    UnknownKey(String),
}

impl ValidationError {
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Errors from the session persistence backend.
///
/// Always best-effort with respect to the timer: callers log and move on,
/// retrying at the next natural trigger (next completion or next poll).
#[derive(Error, Debug)]
pub enum NetworkError {
    /// Request failed to complete
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server rejected the request
    #[error("Server returned {status} for {endpoint}")]
    Status { endpoint: String, status: u16 },

    /// Malformed base URL
    #[error("Invalid base URL: {0}")]
    BadUrl(#[from] url::ParseError),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
