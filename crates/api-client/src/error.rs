//! Error types for the resource client.
//!
//! [`ClientError`] classifies *why* a call failed so the failure can be logged
//! with useful fields. It never reaches callers: [`crate::ResourceClient`]
//! collapses every variant into [`domain::ApiResponse::Failure`] using the
//! variant's `Display` text as the message.
//!
//! [`ConfigError`] is different: it is returned from constructors, before any
//! call has been made.

use reqwest::StatusCode;
use thiserror::Error;

/// Why a single resource call failed.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (connection refused, DNS, TLS)
    /// or the response body could not be read.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered outside the 2xx range with a JSON body.
    ///
    /// `message` is the body's `error` string as sent when it is not blank,
    /// otherwise [`domain::UNKNOWN_ERROR`].
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    /// A body was empty, not valid JSON, or (on 2xx) not the expected shape.
    #[error("{0}")]
    Decode(#[from] serde_json::Error),

    /// The request body could not be serialised.
    #[error("{0}")]
    Encode(#[source] serde_json::Error),
}

impl ClientError {
    /// HTTP status, for failures that got as far as a response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status(),
            ClientError::Decode(_) | ClientError::Encode(_) => None,
        }
    }
}

/// Errors raised while constructing a client.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid base address '{address}': {reason}")]
    InvalidBaseAddress { address: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}
