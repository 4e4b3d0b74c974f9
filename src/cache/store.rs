//! TTL Cache Module
//!
//! Single-value cache that answers freshness queries lazily at read time.

use std::fmt;
use std::marker::PhantomData;

use crate::cache::{current_timestamp_ms, CacheEntry, Codec, JsonCodec, DEFAULT_TTL_MS};
use crate::error::{ProxyError, Result};

/// Cache holding the directory secret token.
pub type SecretCache = TtlCache<String>;

// == Cached ==
/// A fresh value read back from the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cached<T> {
    /// The decoded value
    pub value: T,
    /// Milliseconds left before the value goes stale
    pub remaining_ms: u64,
}

// == TTL Cache ==
/// Holds at most one value, stored in encoded form, with a time-to-live.
///
/// There is no background eviction: staleness is only detected by [`read`].
/// The cache does no locking of its own; share it behind a lock when
/// several requests need it.
///
/// [`read`]: TtlCache::read
pub struct TtlCache<T, C = JsonCodec> {
    entry: CacheEntry,
    codec: C,
    _value: PhantomData<fn() -> T>,
}

impl<T> TtlCache<T, JsonCodec>
where
    JsonCodec: Codec<T>,
{
    /// Creates an empty JSON-backed cache with the default TTL.
    pub fn new() -> Self {
        Self::with_codec(JsonCodec)
    }
}

impl<T> Default for TtlCache<T, JsonCodec>
where
    JsonCodec: Codec<T>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Codec<T>> TtlCache<T, C> {
    // == Constructor ==
    /// Creates an empty cache using `codec` for the stored form.
    pub fn with_codec(codec: C) -> Self {
        Self {
            entry: CacheEntry::new(DEFAULT_TTL_MS),
            codec,
            _value: PhantomData,
        }
    }

    /// Sets the TTL applied to writes that don't override it.
    pub fn with_ttl(mut self, ttl_ms: u64) -> Self {
        if ttl_ms != 0 {
            self.entry.ttl_ms = ttl_ms;
        }
        self
    }

    /// Currently configured TTL in milliseconds.
    pub fn ttl_ms(&self) -> u64 {
        self.entry.ttl_ms
    }

    // == Read ==
    /// Returns the stored value if it is still fresh.
    ///
    /// Returns `Ok(None)` when nothing has been written or the TTL has run
    /// out. Fails with [`ProxyError::Decode`] if the stored form no longer
    /// decodes.
    pub fn read(&self) -> Result<Option<Cached<T>>> {
        self.read_at(current_timestamp_ms())
    }

    pub(crate) fn read_at(&self, now_ms: u64) -> Result<Option<Cached<T>>> {
        let (Some(serialized), Some(remaining)) =
            (self.entry.serialized(), self.entry.remaining_ms_at(now_ms))
        else {
            return Ok(None);
        };

        if remaining <= 0 {
            return Ok(None);
        }

        let value = self.codec.decode(serialized).map_err(ProxyError::Decode)?;
        Ok(Some(Cached {
            value,
            remaining_ms: u64::try_from(remaining).unwrap_or(u64::MAX),
        }))
    }

    // == Write ==
    /// Encodes `value` and stores it stamped with the current time.
    ///
    /// A non-zero `ttl_ms` replaces the configured TTL and sticks for later
    /// writes that pass `None`. If encoding fails the entry is left untouched.
    pub fn write(&mut self, value: &T, ttl_ms: Option<u64>) -> Result<()> {
        self.write_at(value, ttl_ms, current_timestamp_ms())
    }

    pub(crate) fn write_at(&mut self, value: &T, ttl_ms: Option<u64>, now_ms: u64) -> Result<()> {
        let serialized = self.codec.encode(value).map_err(ProxyError::Encode)?;

        if let Some(ttl) = ttl_ms.filter(|ttl| *ttl != 0) {
            self.entry.ttl_ms = ttl;
        }
        self.entry.store(serialized, now_ms);

        Ok(())
    }
}

impl<T, C> fmt::Debug for TtlCache<T, C> {
    // Never print the payload; the cache holds credentials.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtlCache")
            .field("ttl_ms", &self.entry.ttl_ms)
            .field("stored_at", &self.entry.stored_at())
            .finish()
    }
}
