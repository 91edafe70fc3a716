// Copyright (c) 2025 - Cowboy AI, Inc.
//! Orchestrator Node Descriptor

use serde::{Deserialize, Serialize};

/// The orchestrator's view of a cluster member
///
/// `provider_id` is absent (or empty) until the node has been registered
/// against its device; in that case the node is found through the
/// machine-name tag written at provisioning time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescriptor {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
}

impl NodeDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            provider_id: None,
        }
    }

    pub fn with_provider_id(mut self, provider_id: impl Into<String>) -> Self {
        self.provider_id = Some(provider_id.into());
        self
    }

    /// Provider identifier, treating an empty string as absent
    pub fn provider_id(&self) -> Option<&str> {
        self.provider_id.as_deref().filter(|id| !id.is_empty())
    }

    /// A node with neither a name nor a provider identifier carries no
    /// identity at all and cannot be resolved
    pub fn is_nil(&self) -> bool {
        self.name.is_empty() && self.provider_id().is_none()
    }
}
