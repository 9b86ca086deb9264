//! Error types for the Typeform API client.
//!
//! # Design
//! `Transport` and `Decode` are the two failures every call can produce.
//! `NotFound` and `Remote` only appear when the client runs with
//! [`StatusPolicy::Strict`]; under the default policy the HTTP status is not
//! inspected and error bodies go straight to the decoder.
//!
//! [`StatusPolicy::Strict`]: crate::config::StatusPolicy::Strict

use std::error::Error as StdError;

/// Failure to get a response out of the transport at all: DNS, connect, TLS,
/// or a request the transport could not construct.
#[derive(Debug, thiserror::Error)]
#[error("transport failed: {message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ureq::Error> for TransportError {
    fn from(err: ureq::Error) -> Self {
        Self::with_source(err.to_string(), err)
    }
}

/// Errors returned by `TypeformClient` operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body is not valid JSON or does not match the expected shape.
    #[error("decoding response failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// The server returned 404. Carries the response body.
    #[error("not found: {0}")]
    NotFound(String),

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Remote { status: u16, body: String },
}

impl ApiError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, ApiError::Decode(_))
    }
}
