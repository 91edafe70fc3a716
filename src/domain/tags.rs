// Copyright (c) 2025 - Cowboy AI, Inc.
//! Device Tag Parsing
//!
//! Hivelocity exposes device tags as a flat list of free-text strings.
//! Semantically meaningful tags follow `key=value`; everything else is opaque.
//! [`TagSet`] parses the list once into a `key -> [values]` multimap so that
//! single-valued attributes (instance type, machine name) can be extracted
//! with the same cardinality rules:
//!
//! - zero values for the key: [`TagError::NotFound`]
//! - exactly one value: validated as a [`LabelValue`]
//! - more than one value: [`TagError::AmbiguousTag`], never first/last wins

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use super::label::{LabelError, LabelValue};

/// Tag extraction error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TagError {
    #[error("no {key:?} tag found")]
    NotFound { key: TagKey },

    #[error("{key:?} tag has invalid value {value:?}: {source}")]
    InvalidValue {
        key: TagKey,
        value: String,
        #[source]
        source: LabelError,
    },

    #[error("more than one {key:?} tag found: {values:?}")]
    AmbiguousTag { key: TagKey, values: Vec<String> },
}

/// Key of a `key=value` device tag
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagKey(Cow<'static, str>);

impl TagKey {
    /// Instance type published to the orchestrator, e.g. `instance-type=bare-metal-x`
    pub const INSTANCE_TYPE: TagKey = TagKey(Cow::Borrowed("instance-type"));

    /// Machine name written at provisioning time, e.g. `caphv-machine-name=worker-1`
    pub const MACHINE_NAME: TagKey = TagKey(Cow::Borrowed("caphv-machine-name"));

    /// Build a key. A trailing `=` is dropped so `"instance-type="` and
    /// `"instance-type"` name the same key.
    pub fn new(key: impl Into<String>) -> Self {
        let mut key = key.into();
        if key.ends_with('=') {
            key.pop();
        }
        Self(Cow::Owned(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=", self.0)
    }
}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TagKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Device tags parsed into a multimap
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    values: BTreeMap<String, Vec<String>>,
    opaque: Vec<String>,
}

impl TagSet {
    /// Parse raw tags. The key is everything before the first `=`, the value
    /// everything after it with surrounding whitespace trimmed.
    pub fn parse<S: AsRef<str>>(tags: &[S]) -> Self {
        let mut set = Self::default();
        for tag in tags {
            let tag = tag.as_ref();
            match tag.split_once('=') {
                Some((key, value)) => set
                    .values
                    .entry(key.to_string())
                    .or_default()
                    .push(value.trim().to_string()),
                None => set.opaque.push(tag.to_string()),
            }
        }
        set
    }

    /// All values recorded for `key`, in tag order
    pub fn values(&self, key: &TagKey) -> &[String] {
        self.values
            .get(key.as_str())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Tags that are not `key=value` pairs
    pub fn opaque(&self) -> &[String] {
        &self.opaque
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.opaque.is_empty()
    }

    /// Extract the single value for `key`
    pub fn single(&self, key: &TagKey) -> Result<LabelValue, TagError> {
        match self.values(key) {
            [] => Err(TagError::NotFound { key: key.clone() }),
            [value] => LabelValue::new(value.as_str()).map_err(|source| TagError::InvalidValue {
                key: key.clone(),
                value: value.clone(),
                source,
            }),
            values => Err(TagError::AmbiguousTag {
                key: key.clone(),
                values: values.to_vec(),
            }),
        }
    }
}

/// Parse `tags` and extract the single value for `key`
pub fn extract<S: AsRef<str>>(tags: &[S], key: &TagKey) -> Result<LabelValue, TagError> {
    TagSet::parse(tags).single(key)
}
