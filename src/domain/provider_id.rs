// Copyright (c) 2025 - Cowboy AI, Inc.
//! Provider Identifier Codec
//!
//! A node names its backing device through `spec.providerID`, which always
//! has the shape `hivelocity://<device-id>`. The device id is the Hivelocity
//! inventory handle and fits in a signed 32-bit integer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Prefix every provider identifier carries
pub const PROVIDER_PREFIX: &str = "hivelocity://";

/// Provider identifier decoding error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderIdError {
    #[error("missing prefix \"hivelocity://\" in provider id {provider_id:?}")]
    MissingPrefix { provider_id: String },

    #[error("provider id {provider_id:?} does not end in a 32-bit device id")]
    MalformedInteger { provider_id: String },
}

/// Hivelocity device handle
///
/// # Examples
///
/// ```rust
/// use hivelocity_instances::domain::{DeviceId, ProviderId};
///
/// let id = ProviderId::parse("hivelocity://14730").unwrap();
/// assert_eq!(id, DeviceId::new(14730));
/// assert_eq!(id.provider_id(), "hivelocity://14730");
///
/// assert!(ProviderId::parse("14730").is_err()); // no prefix
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(i32);

impl DeviceId {
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Encode back into the `hivelocity://<id>` form
    pub fn provider_id(self) -> String {
        format!("{PROVIDER_PREFIX}{}", self.0)
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for DeviceId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

/// Parses a bare device id ("14730"), not a provider identifier
impl FromStr for DeviceId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i32>().map(Self)
    }
}

/// Decoder for the provider identifier wire format
pub struct ProviderId;

impl ProviderId {
    /// Decode `hivelocity://<id>` into a device handle
    ///
    /// Total over its input: every string maps to a device id, a
    /// `MissingPrefix` error or a `MalformedInteger` error.
    pub fn parse(provider_id: &str) -> Result<DeviceId, ProviderIdError> {
        let digits = provider_id.strip_prefix(PROVIDER_PREFIX).ok_or_else(|| {
            ProviderIdError::MissingPrefix {
                provider_id: provider_id.to_string(),
            }
        })?;

        digits
            .parse::<DeviceId>()
            .map_err(|_| ProviderIdError::MalformedInteger {
                provider_id: provider_id.to_string(),
            })
    }
}
