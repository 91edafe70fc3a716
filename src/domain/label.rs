// Copyright (c) 2025 - Cowboy AI, Inc.
//! Label Value Object with Kubernetes Label-Value Invariants

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Label value validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LabelError {
    #[error("label value exceeds maximum length of 63 characters: {0}")]
    TooLong(usize),

    #[error("invalid character {0:?} in label value")]
    InvalidCharacter(char),

    #[error("label value must start and end with an alphanumeric character")]
    InvalidBoundary,
}

/// Value that is safe to publish as an orchestrator label
///
/// Invariants (Kubernetes label value rules):
/// - Empty, or
/// - At most 63 characters
/// - Only ASCII alphanumerics, `-`, `_` and `.`
/// - Starts and ends with an alphanumeric
///
/// # Examples
///
/// ```rust
/// use hivelocity_instances::domain::LabelValue;
///
/// assert!(LabelValue::new("bare-metal-x").is_ok());
/// assert!(LabelValue::new("").is_ok());
///
/// assert!(LabelValue::new("&").is_err());
/// assert!(LabelValue::new("-leading").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelValue(String);

impl LabelValue {
    /// Maximum length of a label value
    pub const MAX_LENGTH: usize = 63;

    pub fn new(value: impl Into<String>) -> Result<Self, LabelError> {
        let value = value.into();
        Self::validate(&value)?;
        Ok(Self(value))
    }

    fn validate(value: &str) -> Result<(), LabelError> {
        if value.is_empty() {
            return Ok(());
        }

        if value.len() > Self::MAX_LENGTH {
            return Err(LabelError::TooLong(value.len()));
        }

        if let Some(ch) = value
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && !matches!(c, '-' | '_' | '.'))
        {
            return Err(LabelError::InvalidCharacter(ch));
        }

        let starts_ok = value.starts_with(|c: char| c.is_ascii_alphanumeric());
        let ends_ok = value.ends_with(|c: char| c.is_ascii_alphanumeric());
        if !starts_ok || !ends_ok {
            return Err(LabelError::InvalidBoundary);
        }

        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for LabelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LabelValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for LabelValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl TryFrom<&str> for LabelValue {
    type Error = LabelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
