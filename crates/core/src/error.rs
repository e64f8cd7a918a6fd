//! Error types for Ephemeral.

use thiserror::Error;

/// Result type alias using Ephemeral's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Ephemeral.
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Startup Errors
    // =========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid duration {input:?}: {reason}")]
    InvalidDuration { input: String, reason: String },

    // =========================================================================
    // Data Errors
    // =========================================================================
    #[error("Could not parse time {input:?}: {reason}")]
    TimestampParse { input: String, reason: String },

    // =========================================================================
    // Platform Errors
    // =========================================================================
    #[error("HTTP transport error: {0}")]
    Http(String),

    #[error("Platform returned {status}: {message}")]
    Platform { status: u16, message: String },

    // =========================================================================
    // Generic Errors
    // =========================================================================
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid duration error.
    pub fn invalid_duration(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDuration {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create a timestamp parse error.
    pub fn timestamp_parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TimestampParse {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create an HTTP transport error.
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create a platform error from a non-success response.
    pub fn platform(status: u16, message: impl Into<String>) -> Self {
        Self::Platform {
            status,
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
