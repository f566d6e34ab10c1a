//! Error types for the Pinata client

use reqwest::StatusCode;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Pinata operations
pub type PinataResult<T> = Result<T, PinataError>;

/// Pinata client errors
#[derive(Error, Debug)]
pub enum PinataError {
    /// A required argument was missing or empty
    #[error("{0}")]
    Validation(String),

    /// A `{name}` placeholder in the path template had no value
    #[error("path parameter {0} not found")]
    MissingPathParameter(String),

    /// Request body could not be encoded as JSON
    #[error("failed to serialize request body: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Transport failure (DNS, connect, reset, timeout)
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-2xx status
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Textual rendering of the error body
        message: String,
    },

    /// Response body was not the expected JSON
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// A local file could not be read for upload
    #[error("failed to open file {}: {source}", path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Header name or value is not legal HTTP
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// One item of a batch delete failed
    #[error("failed to delete CID {cid}: {source}")]
    DeleteFailed {
        /// CID that could not be unpinned
        cid: String,
        /// Why it failed
        #[source]
        source: Box<PinataError>,
    },

    /// Batch workers stopped before reporting every item
    #[error("Worker pool error: {0}")]
    WorkerPool(String),
}

impl PinataError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an API response error
    pub fn api_response(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// HTTP status carried by this error, if any
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::DeleteFailed { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|status| (400..500).contains(&status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|status| status >= 500)
    }
}

/// Turns a non-2xx response into an error.
///
/// The service does not document its error shape, so the default
/// [`LooseErrorDecoder`] accepts any JSON. Implement this trait to plug in a
/// stricter decoder with [`PinataClient::with_error_decoder`].
///
/// [`PinataClient::with_error_decoder`]: crate::PinataClient::with_error_decoder
pub trait ErrorDecoder: fmt::Debug + Send + Sync {
    /// Build the error for a response with `status` and the full `body`
    fn decode(&self, status: StatusCode, body: &[u8]) -> PinataError;
}

/// Decodes the error body as arbitrary JSON and keeps its text rendering.
///
/// A body that is not JSON at all surfaces as [`PinataError::Decode`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LooseErrorDecoder;

impl ErrorDecoder for LooseErrorDecoder {
    fn decode(&self, status: StatusCode, body: &[u8]) -> PinataError {
        match serde_json::from_slice::<serde_json::Value>(body) {
            Ok(serde_json::Value::String(message)) => {
                PinataError::api_response(status.as_u16(), message)
            }
            Ok(value) => PinataError::api_response(status.as_u16(), value.to_string()),
            Err(e) => PinataError::Decode(e),
        }
    }
}
