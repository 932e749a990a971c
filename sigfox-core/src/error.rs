//! Error types for the Sigfox API client.
//!
//! Every failure the client can surface is a variant of a single
//! `SigfoxError` enum: backend API errors classified from the HTTP
//! status code, transport failures, and view-access errors.

use thiserror::Error;

/// Convenience type alias for Results using SigfoxError.
pub type SigfoxResult<T> = Result<T, SigfoxError>;

/// Unified error type for the Sigfox API client.
#[derive(Error, Debug)]
pub enum SigfoxError {
    // -- Backend API errors, classified from the HTTP status --
    /// The backend rejected the request as malformed (HTTP 400).
    ///
    /// The backend also answers 400 when a `since`/`before` time
    /// filter matches no results at all, so callers filtering by time
    /// may need to treat this as "empty result" rather than a bug.
    #[error("bad request (status {status}): {message}")]
    BadRequest {
        /// HTTP status code (400).
        status: u16,
        /// Error message from the backend.
        message: String,
    },

    /// The credentials were rejected (HTTP 401).
    #[error("authentication failed (status {status}): {message}")]
    Authentication {
        /// HTTP status code (401).
        status: u16,
        /// Error message from the backend.
        message: String,
    },

    /// The credentials lack access to the resource (HTTP 403).
    #[error("access denied (status {status}): {message}")]
    AccessDenied {
        /// HTTP status code (403).
        status: u16,
        /// Error message from the backend.
        message: String,
    },

    /// The resource does not exist (HTTP 404).
    #[error("not found (status {status}): {message}")]
    NotFound {
        /// HTTP status code (404).
        status: u16,
        /// Error message from the backend.
        message: String,
    },

    /// The backend failed internally (HTTP 500).
    #[error("server error (status {status}): {message}")]
    Server {
        /// HTTP status code (500).
        status: u16,
        /// Error message from the backend.
        message: String,
    },

    /// Any other non-success status from the backend.
    #[error("api error (status {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the backend.
        message: String,
    },

    // -- Transport errors --
    /// HTTP request failed before a status was received.
    #[error("http error: {0}")]
    Http(String),

    /// HTTP request timed out.
    #[error("request timeout: {0}")]
    Timeout(String),

    // -- View-object access errors --
    /// Field access on an object view that has no such field.
    #[error("no such field: {0}")]
    NoSuchField(String),

    /// Index access beyond the end of an array view.
    #[error("index {index} out of range for array of length {len}")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Length of the underlying array.
        len: usize,
    },

    /// An access that the underlying JSON shape does not support,
    /// e.g. field access on a scalar or concatenation of objects.
    #[error("expected {expected} value, found {found}")]
    WrongShape {
        /// Shape required by the access.
        expected: &'static str,
        /// Shape actually present.
        found: &'static str,
    },

    // -- Ambient --
    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Failed to load or parse settings.
    #[error("configuration error: {0}")]
    Config(String),

    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SigfoxError {
    /// Classify an HTTP status code into the matching error kind.
    ///
    /// Pure status-to-kind mapping; no retry decisions are made here
    /// or anywhere else in the client.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            400 => SigfoxError::BadRequest { status, message },
            401 => SigfoxError::Authentication { status, message },
            403 => SigfoxError::AccessDenied { status, message },
            404 => SigfoxError::NotFound { status, message },
            500 => SigfoxError::Server { status, message },
            _ => SigfoxError::Api { status, message },
        }
    }

    /// The HTTP status code carried by backend API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            SigfoxError::BadRequest { status, .. }
            | SigfoxError::Authentication { status, .. }
            | SigfoxError::AccessDenied { status, .. }
            | SigfoxError::NotFound { status, .. }
            | SigfoxError::Server { status, .. }
            | SigfoxError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this error came from a backend status classification.
    pub fn is_api_error(&self) -> bool {
        self.status().is_some()
    }
}

impl From<serde_json::Error> for SigfoxError {
    fn from(e: serde_json::Error) -> Self {
        SigfoxError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for SigfoxError {
    fn from(e: toml::de::Error) -> Self {
        SigfoxError::Config(e.to_string())
    }
}
