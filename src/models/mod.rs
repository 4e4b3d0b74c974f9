//! Request and Response models for the directory proxy
//!
//! This module defines the inbound event shape and the outbound response
//! envelope.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{ProxyEvent, RequestContext, API_KEY_HEADER};
pub use responses::{HealthResponse, ResponseEnvelope};
