//! Error types for the directory proxy
//!
//! Provides unified error handling using thiserror.

use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::models::ResponseEnvelope;

/// Boxed error carried by collaborator and codec failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

// == Proxy Error Enum ==
/// Unified error type for the directory proxy.
///
/// Each variant is a terminal failure for the current request. None of them
/// are retried inside the crate; the handler turns all of them into an opaque
/// 500 envelope.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Cached value could not be serialized
    #[error("Failed to encode cached value")]
    Encode(#[source] BoxError),

    /// Cached value could not be deserialized
    #[error("Failed to decode cached value")]
    Decode(#[source] BoxError),

    /// A paged directory call failed
    #[error("Error in invoking method: {method}")]
    RemoteCall {
        method: String,
        #[source]
        source: BoxError,
    },

    /// Action name has no entry in the action table
    #[error("Unsupported action: {0}")]
    UnsupportedAction(String),

    /// Secret store could not be read
    #[error("Error retrieving secret: {0}")]
    SecretFetch(String),

    /// Secret payload did not carry a token
    #[error("Malformed secret payload: {0}")]
    MalformedSecret(String),

    /// Cross-account role could not be assumed
    #[error("Error assuming role: {0}")]
    RoleAssume(String),

    /// Request carried no API key header
    #[error("Token is undefined")]
    MissingApiKey,

    /// API key did not match the secret token
    #[error("Token does not match secret")]
    TokenMismatch,

    /// Request carried no operation name
    #[error("Missing operationName in event")]
    MissingOperation,

    /// Directory answered with an error-shaped body
    #[error("Unexpected response from directory: {0}")]
    UnexpectedResponse(String),
}

impl ProxyError {
    /// Wraps a paged-call failure with the method that produced it.
    pub fn remote_call(method: impl Into<String>, source: impl Into<BoxError>) -> Self {
        ProxyError::RemoteCall {
            method: method.into(),
            source: source.into(),
        }
    }

    /// This error followed by every underlying cause, joined by `": "`.
    pub fn display_chain(&self) -> String {
        let mut chain = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            chain.push_str(": ");
            chain.push_str(&cause.to_string());
            source = cause.source();
        }
        chain
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    /// Every variant maps to the same opaque 500; the cause stays server side.
    fn into_response(self) -> Response {
        ResponseEnvelope::internal_error().into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the directory proxy.
pub type Result<T> = std::result::Result<T, ProxyError>;
