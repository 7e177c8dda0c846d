//! Error types that leave the envelope.
//!
//! Inside the client every failure is an [`crate::ApiResponse::Failure`].
//! [`RequestFailed`] exists for callers that prefer `?` propagation and call
//! [`crate::ApiResponse::into_result`].

use thiserror::Error;

/// A resource call that did not succeed.
///
/// Carries only the message: the envelope does not preserve whether the
/// failure came from the transport, the status code or the decoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RequestFailed {
    message: String,
}

impl RequestFailed {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// An identifier was empty where the backend addresses a resource by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("identifier must not be empty")]
pub struct EmptyIdentifier;
