// Copyright (c) 2025 - Cowboy AI, Inc.
//! Canonical Instance Metadata
//!
//! The values returned here are translated by the orchestrator into node
//! fields and labels when the node registers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a node address, mirroring the orchestrator's address types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeAddressType {
    Hostname,
    #[serde(rename = "ExternalIP")]
    ExternalIp,
    #[serde(rename = "InternalIP")]
    InternalIp,
}

impl fmt::Display for NodeAddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeAddressType::Hostname => "Hostname",
            NodeAddressType::ExternalIp => "ExternalIP",
            NodeAddressType::InternalIp => "InternalIP",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeAddress {
    #[serde(rename = "type")]
    pub address_type: NodeAddressType,
    pub address: String,
}

impl NodeAddress {
    pub fn external(address: impl Into<String>) -> Self {
        Self {
            address_type: NodeAddressType::ExternalIp,
            address: address.into(),
        }
    }
}

/// Metadata for one instance, built fresh per call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceMetadata {
    #[serde(rename = "providerID")]
    pub provider_id: String,
    pub instance_type: String,
    pub node_addresses: Vec<NodeAddress>,
    pub zone: String,
    pub region: String,
}
