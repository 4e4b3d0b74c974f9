//! Directory Proxy - authenticated gateway to a paged organization directory
//!
//! Checks callers against a shared secret held in a single-entry TTL cache,
//! assumes a cross-account role and aggregates the paged directory response.

pub mod api;
pub mod cache;
pub mod config;
pub mod directory;
pub mod error;
pub mod handler;
pub mod models;
pub mod services;

pub use api::AppState;
pub use config::Config;
pub use error::{ProxyError, Result};
pub use handler::{HandlerSettings, ProxyHandler};
