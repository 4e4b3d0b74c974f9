//! API Module
//!
//! HTTP handlers and routing for the directory proxy.
//!
//! # Endpoints
//! - `POST /invoke` - Handle an API-gateway shaped event, return the envelope
//! - `GET /api/:operation` - Handle a plain HTTP request for an operation
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
