//! Error taxonomy for panel operations.

use thiserror::Error;

use crate::net::{Method, TransportError};
use crate::resilience::Retryable;

/// Errors returned by every panel operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level failure that was not retried (or not retryable).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The panel answered with a 4xx/5xx status.
    #[error("HTTP {status} from {url}: {body}")]
    Status { status: u16, url: String, body: String },

    /// Login succeeded at the HTTP level but no session cookie came back.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// A non-login request was attempted before `login()`.
    #[error("before making a {method} request, you must use the login() method")]
    NotLoggedIn { method: Method },

    /// The envelope's `success` flag was false.
    #[error("remote operation unsuccessful: {message}")]
    Remote { message: String },

    /// A request payload could not be serialized. Nothing was sent.
    #[error("failed to encode request payload: {0}")]
    Encode(#[from] serde_json::Error),

    /// The body was not the JSON shape the endpoint promises.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Every attempt failed with a retryable transport error.
    #[error("request to {url} failed after {attempts} attempts: {source}")]
    RetryExhausted {
        attempts: u32,
        url: String,
        #[source]
        source: TransportError,
    },

    /// The retry loop finished without an outcome (zero attempt budget).
    #[error("max retries exceeded with no successful response to {url}")]
    MaxRetriesExceeded { url: String },

    /// The configured panel host cannot be used as a base URL.
    #[error("invalid panel host '{0}'")]
    InvalidHost(String),

    /// Local file I/O (e.g., saving a database backup).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Server-supplied message of a failed envelope.
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            ApiError::Remote { message } => Some(message),
            _ => None,
        }
    }

    /// Short label for metrics.
    pub(crate) fn outcome(&self) -> &'static str {
        match self {
            ApiError::Transport(_) => "transport_error",
            ApiError::Status { .. } => "http_error",
            ApiError::Authentication(_) => "auth_error",
            ApiError::NotLoggedIn { .. } => "not_logged_in",
            ApiError::Remote { .. } => "remote_error",
            ApiError::Encode(_) => "encode_error",
            ApiError::MalformedResponse(_) => "malformed",
            ApiError::RetryExhausted { .. } | ApiError::MaxRetriesExceeded { .. } => "exhausted",
            ApiError::InvalidHost(_) => "invalid_host",
            ApiError::Io(_) => "io_error",
        }
    }
}

impl Retryable for ApiError {
    fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Transport(e) if e.is_retryable())
    }
}

/// Result type for panel operations.
pub type ApiResult<T> = Result<T, ApiError>;
