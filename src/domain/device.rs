// Copyright (c) 2025 - Cowboy AI, Inc.
//! Hivelocity Bare Metal Device Snapshot

use serde::{Deserialize, Serialize};
use std::fmt;

use super::provider_id::DeviceId;
use super::tags::TagSet;

/// Bare metal device as returned by the Hivelocity inventory
///
/// Only the fields this crate reads are modelled; unknown fields in the API
/// payload are ignored and missing ones default to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub device_id: DeviceId,

    #[serde(default)]
    pub hostname: String,

    /// Raw power status, `"ON"` or `"OFF"` when the device is consistent
    #[serde(default)]
    pub power_status: String,

    #[serde(default)]
    pub primary_ip: String,

    /// Facility code such as `LAX2`
    #[serde(default)]
    pub location_name: String,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl Device {
    pub fn new(device_id: impl Into<DeviceId>) -> Self {
        Self {
            device_id: device_id.into(),
            hostname: String::new(),
            power_status: String::new(),
            primary_ip: String::new(),
            location_name: String::new(),
            tags: Vec::new(),
        }
    }

    pub fn with_power_status(mut self, status: impl Into<String>) -> Self {
        self.power_status = status.into();
        self
    }

    pub fn with_primary_ip(mut self, ip: impl Into<String>) -> Self {
        self.primary_ip = ip.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location_name = location.into();
        self
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn power(&self) -> PowerStatus {
        PowerStatus::parse(&self.power_status)
    }

    pub fn tag_set(&self) -> TagSet {
        TagSet::parse(&self.tags)
    }
}

/// Device power status
///
/// Matching is exact: `"on"` or `" ON"` is not [`PowerStatus::On`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PowerStatus {
    On,
    Off,
    Other(String),
}

impl PowerStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "ON" => PowerStatus::On,
            "OFF" => PowerStatus::Off,
            other => PowerStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for PowerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PowerStatus::On => f.write_str("ON"),
            PowerStatus::Off => f.write_str("OFF"),
            PowerStatus::Other(raw) => f.write_str(raw),
        }
    }
}
