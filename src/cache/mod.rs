//! Cache Module
//!
//! Provides a single-entry in-memory cache with lazy TTL expiration.

mod codec;
mod entry;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use codec::{Codec, JsonCodec};
pub use entry::{current_timestamp_ms, CacheEntry, DEFAULT_TTL_MS};
pub use store::{Cached, SecretCache, TtlCache};
