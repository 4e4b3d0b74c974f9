//! Cache Codec Module
//!
//! Encode/decode boundary between a cached value and its stored string form.

use serde::{de::DeserializeOwned, Serialize};

use crate::error::BoxError;

/// Converts values to and from the serialized form kept in a [`CacheEntry`].
///
/// Decoding the encoded form of a value must yield an equal value.
///
/// [`CacheEntry`]: super::CacheEntry
pub trait Codec<T> {
    fn encode(&self, value: &T) -> Result<String, BoxError>;
    fn decode(&self, raw: &str) -> Result<T, BoxError>;
}

/// JSON codec backed by serde_json.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl<T> Codec<T> for JsonCodec
where
    T: Serialize + DeserializeOwned,
{
    fn encode(&self, value: &T) -> Result<String, BoxError> {
        Ok(serde_json::to_string(value)?)
    }

    fn decode(&self, raw: &str) -> Result<T, BoxError> {
        Ok(serde_json::from_str(raw)?)
    }
}
