// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the Provider Identifier Codec

use hivelocity_instances::domain::{DeviceId, ProviderId, ProviderIdError, PROVIDER_PREFIX};
use proptest::prelude::*;

/// The prefix with one edit applied: a character dropped, replaced or
/// upper-cased, or the tail cut off
fn near_miss_prefix() -> impl Strategy<Value = String> {
    let len = PROVIDER_PREFIX.len();
    (0..len, 0..4u8, any::<char>()).prop_map(move |(index, edit, replacement)| {
        let mut chars: Vec<char> = PROVIDER_PREFIX.chars().collect();
        match edit {
            0 => {
                chars.remove(index);
            }
            1 => chars[index] = replacement,
            2 => chars[index] = chars[index].to_ascii_uppercase(),
            _ => chars.truncate(index),
        }
        chars.into_iter().collect()
    })
}

proptest! {
    /// Encoding then decoding any device id returns the same id
    #[test]
    fn prop_device_id_codec_inverts(id in any::<i32>()) {
        let device_id = DeviceId::new(id);
        prop_assert_eq!(ProviderId::parse(&device_id.provider_id()), Ok(device_id));
    }

    /// Anything without the prefix is MissingPrefix, never MalformedInteger,
    /// including strings that almost carry it
    #[test]
    fn prop_missing_prefix(
        head in prop_oneof![Just(String::new()), near_miss_prefix()],
        rest in ".*",
    ) {
        let raw = format!("{}{}", head, rest);
        prop_assume!(!raw.starts_with(PROVIDER_PREFIX));

        let is_missing_prefix = matches!(
            ProviderId::parse(&raw),
            Err(ProviderIdError::MissingPrefix { .. })
        );
        prop_assert!(is_missing_prefix);
    }

    /// Integers outside the 32-bit range are rejected
    #[test]
    fn prop_out_of_range_rejected(
        id in prop_oneof![
            (i32::MAX as i64 + 1)..i64::MAX,
            i64::MIN..(i32::MIN as i64),
        ]
    ) {
        let raw = format!("{}{}", PROVIDER_PREFIX, id);
        let is_malformed = matches!(
            ProviderId::parse(&raw),
            Err(ProviderIdError::MalformedInteger { .. })
        );
        prop_assert!(is_malformed);
    }

    /// Non-numeric suffixes are rejected
    #[test]
    fn prop_non_numeric_suffix_rejected(suffix in "[a-zA-Z][a-zA-Z0-9]{0,10}") {
        let raw = format!("{}{}", PROVIDER_PREFIX, suffix);
        prop_assert!(ProviderId::parse(&raw).is_err());
    }
}
