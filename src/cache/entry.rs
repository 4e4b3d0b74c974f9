//! Cache Entry Module
//!
//! Defines the single slot held by a TTL cache.

use std::time::{SystemTime, UNIX_EPOCH};

/// Default time-to-live for cached values (5 minutes).
pub const DEFAULT_TTL_MS: u64 = 300_000;

// == Stored Value ==
/// Serialized payload and the instant it was written, always set together.
#[derive(Debug, Clone, PartialEq, Eq)]
struct StoredValue {
    serialized: String,
    stored_at: u64,
}

// == Cache Entry ==
/// The one entry of a cache instance.
///
/// Starts empty. A write replaces the payload and timestamp as a unit; a
/// stale payload stays in place until the next write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    stored: Option<StoredValue>,
    /// Time-to-live applied when computing freshness, in milliseconds
    pub ttl_ms: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an empty entry with the given TTL.
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            stored: None,
            ttl_ms,
        }
    }

    // == Store ==
    /// Replaces the payload and stamps it with `now_ms`.
    pub fn store(&mut self, serialized: String, now_ms: u64) {
        self.stored = Some(StoredValue {
            serialized,
            stored_at: now_ms,
        });
    }

    /// Serialized payload, if one has been written.
    pub fn serialized(&self) -> Option<&str> {
        self.stored.as_ref().map(|s| s.serialized.as_str())
    }

    /// Write timestamp (Unix milliseconds), if one has been written.
    pub fn stored_at(&self) -> Option<u64> {
        self.stored.as_ref().map(|s| s.stored_at)
    }

    // == Remaining ==
    /// Milliseconds left before the payload goes stale, measured at `now_ms`.
    ///
    /// Negative once the TTL has elapsed; `None` while nothing is stored.
    /// Computed in `i128` so any `u64` timestamp and TTL fit.
    pub fn remaining_ms_at(&self, now_ms: u64) -> Option<i128> {
        self.stored_at()
            .map(|stored_at| i128::from(stored_at) + i128::from(self.ttl_ms) - i128::from(now_ms))
    }

    // == Is Fresh ==
    /// A payload is fresh iff `stored_at + ttl - now > 0`.
    pub fn is_fresh_at(&self, now_ms: u64) -> bool {
        matches!(self.remaining_ms_at(now_ms), Some(remaining) if remaining > 0)
    }
}

impl Default for CacheEntry {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_MS)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
