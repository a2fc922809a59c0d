//! Domain error types
//!
//! This module defines the error hierarchy for debtwatch.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main debtwatch error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum DebtwatchError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Upstream data source errors
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// A merged series or snapshot violated an invariant
    #[error("Reconciliation error: {0}")]
    Reconciliation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// HTTP server errors (bind, serve)
    #[error("Server error: {0}")]
    Server(String),
}

/// Errors raised by external source adapters
///
/// These never reach an HTTP caller: the reconciliation layer turns every
/// `SourceError` into an empty contribution.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Failed to connect to the upstream API
    #[error("Failed to connect to source: {0}")]
    ConnectionFailed(String),

    /// Request exceeded its timeout
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Non-2xx HTTP status
    #[error("Source returned HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    /// Payload parsed as JSON but did not have the expected shape
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Payload could not be decoded at all
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl SourceError {
    /// Map a `reqwest` error onto the adapter taxonomy
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SourceError::Timeout(err.to_string())
        } else if err.is_decode() {
            SourceError::InvalidResponse(err.to_string())
        } else {
            SourceError::ConnectionFailed(err.to_string())
        }
    }
}

impl From<std::io::Error> for DebtwatchError {
    fn from(err: std::io::Error) -> Self {
        DebtwatchError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DebtwatchError {
    fn from(err: serde_json::Error) -> Self {
        DebtwatchError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for DebtwatchError {
    fn from(err: toml::de::Error) -> Self {
        DebtwatchError::Configuration(format!("Failed to parse TOML: {err}"))
    }
}
