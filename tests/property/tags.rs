// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Tag Extraction

use hivelocity_instances::domain::{extract, TagError, TagKey};
use proptest::prelude::*;

/// Values that satisfy the label rules
fn label_value() -> impl Strategy<Value = String> {
    "[a-z0-9]([a-z0-9._-]{0,40}[a-z0-9])?"
}

proptest! {
    /// A single well-formed tag is always found, whatever surrounds it
    #[test]
    fn prop_single_tag_extracted(
        value in label_value(),
        noise in prop::collection::vec("[a-z]{1,8}(=[a-z]{0,8})?", 0..6),
    ) {
        let mut tags: Vec<String> = noise
            .into_iter()
            .filter(|tag| !tag.starts_with("instance-type"))
            .collect();
        tags.push(format!("instance-type={}", value));

        let extracted = extract(&tags, &TagKey::INSTANCE_TYPE).unwrap();
        prop_assert_eq!(extracted.as_str(), value.as_str());
    }

    /// Two occurrences of the key are ambiguous, even with equal values
    #[test]
    fn prop_duplicate_tag_ambiguous(a in label_value(), b in label_value()) {
        let tags = vec![format!("instance-type={}", a), format!("instance-type={}", b)];

        let is_ambiguous = matches!(
            extract(&tags, &TagKey::INSTANCE_TYPE),
            Err(TagError::AmbiguousTag { .. })
        );
        prop_assert!(is_ambiguous);
    }

    /// Values longer than 63 characters never validate
    #[test]
    fn prop_long_values_rejected(value in "[a-z]{64,100}") {
        let tags = vec![format!("instance-type={}", value)];

        let is_invalid = matches!(
            extract(&tags, &TagKey::INSTANCE_TYPE),
            Err(TagError::InvalidValue { .. })
        );
        prop_assert!(is_invalid);
    }
}
