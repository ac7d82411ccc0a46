//! Error types for the PTSP client.
//!
//! # Design
//! Every operation fails with a single `ApiError` so callers match on one
//! type. The variant says which stage failed; `Display` carries the
//! human-readable message and `std::error::Error::source` exposes the
//! underlying cause where there is one.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors returned by `PtspClient` and `ApiClient`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A 2xx response was missing a field the caller cannot do without.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The request never produced an HTTP response.
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with a non-2xx status. `message` is the
    /// composed gateway message (response code, primary message and any
    /// field errors).
    #[error("{message}")]
    Http { status: u16, message: String },

    /// A 2xx response whose body is not a JSON object.
    #[error("Invalid JSON response received from API (HTTP {status})")]
    InvalidResponseFormat { status: u16 },

    /// The HTTP verb is outside GET/POST/PUT/PATCH/DELETE.
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Missing or invalid client configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status of the failed exchange, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } | ApiError::InvalidResponseFormat { status } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

/// A successful response that cannot be turned into a typed result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("{field} not found in API response")]
    MissingField { field: &'static str },
}

/// Failure below the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("failed to read response body: {0}")]
    Body(String),
}
