//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check freshness, expiry and round-trip behaviour of the
//! single-entry TTL cache.

use proptest::prelude::*;
use std::collections::BTreeMap;

use crate::cache::{Codec, JsonCodec, SecretCache, TtlCache};

// == Strategies ==
/// Generates secret-like token strings, including non-ASCII and quotes
fn token_strategy() -> impl Strategy<Value = String> {
    any::<String>()
}

/// Generates positive TTLs up to one day
fn ttl_strategy() -> impl Strategy<Value = u64> {
    1u64..86_400_000
}

/// Generates TTLs across the whole `u64` range, well past one day
fn huge_ttl_strategy() -> impl Strategy<Value = u64> {
    prop_oneof![
        Just(u64::MAX),
        Just(i64::MAX as u64),
        1_000_000u64..=u64::MAX,
    ]
}

/// Generates a plausible write timestamp
fn timestamp_strategy() -> impl Strategy<Value = u64> {
    1_600_000_000_000u64..1_900_000_000_000
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Immediately after a write the value reads back with the full TTL left.
    #[test]
    fn prop_fresh_after_write(token in token_strategy(), ttl in ttl_strategy(), now in timestamp_strategy()) {
        let mut cache = SecretCache::new();
        cache.write_at(&token, Some(ttl), now).unwrap();

        let cached = cache.read_at(now).unwrap();
        prop_assert!(cached.is_some(), "Value should be fresh right after write");
        let cached = cached.unwrap();
        prop_assert_eq!(cached.value, token);
        prop_assert_eq!(cached.remaining_ms, ttl);
    }

    // Any TTL, however large, keeps the value fresh for the elapsed time below it.
    #[test]
    fn prop_huge_ttl_stays_fresh(
        token in token_strategy(),
        ttl in huge_ttl_strategy(),
        now in timestamp_strategy(),
        elapsed in 0u64..1_000_000
    ) {
        let mut cache = SecretCache::new();
        cache.write_at(&token, Some(ttl), now).unwrap();

        let cached = cache.read_at(now + elapsed).unwrap();
        prop_assert!(cached.is_some(), "Value with ttl {} should still be fresh", ttl);
        let cached = cached.unwrap();
        prop_assert_eq!(cached.value, token);
        prop_assert_eq!(cached.remaining_ms, ttl - elapsed);
    }

    // Once elapsed time reaches the TTL the cache reports a miss.
    #[test]
    fn prop_expired_after_ttl(
        token in token_strategy(),
        ttl in ttl_strategy(),
        now in timestamp_strategy(),
        extra in 0u64..1_000_000
    ) {
        let mut cache = SecretCache::new();
        cache.write_at(&token, Some(ttl), now).unwrap();

        prop_assert!(cache.read_at(now + ttl + extra).unwrap().is_none());
    }

    // Remaining time decreases one-for-one with elapsed time while fresh.
    #[test]
    fn prop_remaining_tracks_elapsed(ttl in 2u64..1_000_000, now in timestamp_strategy(), frac in 0.0f64..1.0) {
        let elapsed = ((ttl - 1) as f64 * frac) as u64;
        let mut cache = SecretCache::new();
        cache.write_at(&"v".to_string(), Some(ttl), now).unwrap();

        let cached = cache.read_at(now + elapsed).unwrap().unwrap();
        prop_assert_eq!(cached.remaining_ms, ttl - elapsed);
    }

    // A TTL given on one write applies to later writes that omit it.
    #[test]
    fn prop_ttl_override_persists(
        v1 in token_strategy(),
        v2 in token_strategy(),
        ttl in ttl_strategy(),
        now in timestamp_strategy()
    ) {
        let mut cache = SecretCache::new();
        cache.write_at(&v1, Some(ttl), now).unwrap();
        cache.write_at(&v2, None, now).unwrap();

        prop_assert_eq!(cache.ttl_ms(), ttl);
        prop_assert!(cache.read_at(now + ttl).unwrap().is_none());
        prop_assert!(cache.read_at(now + ttl - 1).unwrap().is_some());
    }

    // The last write always wins.
    #[test]
    fn prop_overwrite_semantics(v1 in token_strategy(), v2 in token_strategy(), now in timestamp_strategy()) {
        let mut cache = SecretCache::new();
        cache.write_at(&v1, None, now).unwrap();
        cache.write_at(&v2, None, now + 1).unwrap();

        let cached = cache.read_at(now + 1).unwrap().unwrap();
        prop_assert_eq!(cached.value, v2);
    }

    // Decoding the encoded form yields an equal value.
    #[test]
    fn prop_codec_round_trip(value in prop::collection::btree_map("[a-zA-Z]{1,8}", any::<i64>(), 0..8)) {
        let encoded = JsonCodec.encode(&value).unwrap();
        let decoded: BTreeMap<String, i64> = JsonCodec.decode(&encoded).unwrap();
        prop_assert_eq!(decoded, value);
    }

    // Structured values survive the cache unchanged.
    #[test]
    fn prop_cache_round_trip(value in prop::collection::vec(any::<String>(), 0..8), now in timestamp_strategy()) {
        let mut cache: TtlCache<Vec<String>> = TtlCache::new();
        cache.write_at(&value, None, now).unwrap();

        let cached = cache.read_at(now).unwrap().unwrap();
        prop_assert_eq!(cached.value, value);
    }
}
