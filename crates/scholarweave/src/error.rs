//! Error types for the ScholarWeave client.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.
//! Every variant is shown to the user through the same "request failed" banner; the
//! variants exist for logging and tests.

use std::time::Duration;

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error
    #[error("Middleware error: {0}")]
    Middleware(reqwest_middleware::Error),

    /// Request timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Resource not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from the backend
        message: String,
    },

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ClientError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Classify a transport failure, folding reqwest timeouts into [`ClientError::Timeout`].
    #[must_use]
    pub fn from_transport(err: reqwest_middleware::Error, timeout: Duration) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(e) if e.is_timeout() => Self::Timeout(timeout),
            reqwest_middleware::Error::Reqwest(e) => Self::Http(e),
            other => Self::Middleware(other),
        }
    }

    /// HTTP status code carried by this error, if the backend answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::BadRequest { .. } => Some(400),
            Self::Server { status, .. } | Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if this error is a 404 from the backend.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Message shown in error banners.
    ///
    /// All failures share one display category, so this is the error text verbatim,
    /// falling back to a generic message when the backend sent an empty body.
    #[must_use]
    pub fn user_message(&self) -> String {
        let message = match self {
            Self::NotFound { resource } => resource.trim(),
            Self::BadRequest { message }
            | Self::Server { message, .. }
            | Self::UnexpectedStatus { message, .. } => message.trim(),
            _ => return self.to_string(),
        };

        if message.is_empty() {
            match self.status() {
                Some(status) => format!("Request failed with status code {status}"),
                None => "Request failed".to_string(),
            }
        } else {
            message.to_string()
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
