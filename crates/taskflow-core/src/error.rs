//! Client error types.

use std::fmt;

use thiserror::Error;

/// A failed call to the backend.
///
/// Covers both non-success HTTP responses and transport failures; callers
/// do not need to tell them apart since nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestError {
    /// HTTP status, absent when no response was received.
    pub status_code: Option<u16>,
    /// Message supplied by the server, if any.
    pub server_message: Option<String>,
    cause: Option<String>,
}

impl RequestError {
    /// A non-success response.
    pub fn status(status_code: u16, server_message: Option<String>) -> Self {
        Self {
            status_code: Some(status_code),
            server_message,
            cause: None,
        }
    }

    /// No response was received (connection refused, timeout, ...).
    pub fn transport(cause: impl Into<String>) -> Self {
        Self {
            status_code: None,
            server_message: None,
            cause: Some(cause.into()),
        }
    }

    /// A response arrived but its body did not have the expected shape.
    pub fn decode(cause: impl Into<String>) -> Self {
        Self {
            status_code: None,
            server_message: None,
            cause: Some(format!("unexpected response body: {}", cause.into())),
        }
    }

    /// Text to show the user: the server's message, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message
            .clone()
            .unwrap_or_else(|| fallback.to_string())
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status_code == Some(401)
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.status_code, &self.server_message, &self.cause) {
            (Some(code), Some(msg), _) => write!(f, "request failed ({}): {}", code, msg),
            (Some(code), None, _) => write!(f, "request failed with status {}", code),
            (None, _, Some(cause)) => write!(f, "request failed: {}", cause),
            (None, _, None) => write!(f, "request failed"),
        }
    }
}

impl std::error::Error for RequestError {}

/// A required-field violation detected before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Durable credential storage failures.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Umbrella error for operations that validate, call the backend and
/// touch the session.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ClientError {
    /// Text to show the user, falling back to `fallback` when the server
    /// gave no reason.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Request(err) => err.user_message(fallback),
            ClientError::Validation(err) => err.message.clone(),
            ClientError::Storage(err) => format!("{}: {}", fallback, err),
        }
    }
}
