// Copyright (c) 2025 - Cowboy AI, Inc.
//! Instance State Projector
//!
//! Answers the orchestrator's three instance questions for a node by
//! resolving it to a device and projecting the device's raw fields:
//!
//! | Resolution | `instance_exists` | `instance_shutdown` | `instance_metadata` |
//! |------------|-------------------|---------------------|---------------------|
//! | Found      | `true`            | ON/OFF -> bool      | metadata            |
//! | NotFound   | `false`           | `NoDeviceFound`     | `NoDeviceFound`     |
//! | Err        | error             | error               | error               |
//!
//! Existence has a meaningful "no"; shutdown state and metadata of a
//! missing instance do not, so those fail loudly.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::context::CallContext;
use crate::domain::{
    Device, InstanceMetadata, NodeAddress, NodeDescriptor, PowerStatus, TagKey,
};
use crate::errors::{Operation, ProviderError, ProviderResult};
use crate::inventory::DeviceInventory;
use crate::resolver::{DeviceResolver, Resolution};

/// Instance provider contract expected by the orchestrator
///
/// All methods are read-only and idempotent: the same node against an
/// unchanged inventory yields the same answer.
#[async_trait]
pub trait InstancesV2: Send + Sync {
    /// Whether the node's instance still exists
    async fn instance_exists(&self, ctx: &CallContext, node: &NodeDescriptor)
        -> ProviderResult<bool>;

    /// Whether the node's instance is powered off
    async fn instance_shutdown(
        &self,
        ctx: &CallContext,
        node: &NodeDescriptor,
    ) -> ProviderResult<bool>;

    /// Metadata the orchestrator records on the node at registration
    async fn instance_metadata(
        &self,
        ctx: &CallContext,
        node: &NodeDescriptor,
    ) -> ProviderResult<InstanceMetadata>;
}

/// [`InstancesV2`] backed by the Hivelocity device inventory
#[derive(Debug, Clone)]
pub struct HivelocityInstances<I> {
    resolver: DeviceResolver<I>,
    instance_type_tag: TagKey,
}

impl<I: DeviceInventory> HivelocityInstances<I> {
    pub fn new(inventory: I) -> Self {
        Self {
            resolver: DeviceResolver::new(inventory),
            instance_type_tag: TagKey::INSTANCE_TYPE,
        }
    }

    pub fn with_instance_type_tag(mut self, key: TagKey) -> Self {
        self.instance_type_tag = key;
        self
    }

    pub fn with_machine_name_tag(mut self, key: TagKey) -> Self {
        self.resolver = self.resolver.with_machine_name_tag(key);
        self
    }

    async fn resolve(
        &self,
        operation: Operation,
        ctx: &CallContext,
        node: &NodeDescriptor,
    ) -> ProviderResult<Resolution> {
        if node.is_nil() {
            return Err(ProviderError::NodeIsNil { operation });
        }
        self.resolver.resolve(operation, ctx, node).await
    }

    /// Resolve and require a device
    async fn require_device(
        &self,
        operation: Operation,
        ctx: &CallContext,
        node: &NodeDescriptor,
    ) -> ProviderResult<Device> {
        match self.resolve(operation, ctx, node).await? {
            Resolution::Found(device) => Ok(device),
            Resolution::NotFound => Err(ProviderError::NoDeviceFound {
                operation,
                node: node.name.clone(),
            }),
        }
    }

    fn project_metadata(
        &self,
        node: &NodeDescriptor,
        device: &Device,
    ) -> ProviderResult<InstanceMetadata> {
        let instance_type = device
            .tag_set()
            .single(&self.instance_type_tag)
            .map_err(|source| ProviderError::Tag {
                operation: Operation::InstanceMetadata,
                node: node.name.clone(),
                device_id: device.device_id,
                source,
            })?;

        // The inventory has a single facility name and no zone/region split
        Ok(InstanceMetadata {
            provider_id: device.device_id.to_string(),
            instance_type: instance_type.into_inner(),
            node_addresses: vec![NodeAddress::external(device.primary_ip.clone())],
            zone: device.location_name.clone(),
            region: device.location_name.clone(),
        })
    }
}

#[async_trait]
impl<I: DeviceInventory> InstancesV2 for HivelocityInstances<I> {
    async fn instance_exists(
        &self,
        ctx: &CallContext,
        node: &NodeDescriptor,
    ) -> ProviderResult<bool> {
        let exists = self
            .resolve(Operation::InstanceExists, ctx, node)
            .await?
            .is_found();
        debug!(node = %node.name, exists, "InstanceExists");
        Ok(exists)
    }

    async fn instance_shutdown(
        &self,
        ctx: &CallContext,
        node: &NodeDescriptor,
    ) -> ProviderResult<bool> {
        let device = self
            .require_device(Operation::InstanceShutdown, ctx, node)
            .await?;

        match device.power() {
            PowerStatus::On => Ok(false),
            PowerStatus::Off => Ok(true),
            PowerStatus::Other(status) => {
                warn!(
                    node = %node.name,
                    device_id = %device.device_id,
                    status = %status,
                    "Device has unknown power status"
                );
                Err(ProviderError::UnknownPowerStatus {
                    operation: Operation::InstanceShutdown,
                    node: node.name.clone(),
                    device_id: device.device_id,
                    status,
                })
            }
        }
    }

    async fn instance_metadata(
        &self,
        ctx: &CallContext,
        node: &NodeDescriptor,
    ) -> ProviderResult<InstanceMetadata> {
        let device = self
            .require_device(Operation::InstanceMetadata, ctx, node)
            .await?;
        let metadata = self.project_metadata(node, &device)?;
        debug!(
            node = %node.name,
            provider_id = %metadata.provider_id,
            instance_type = %metadata.instance_type,
            zone = %metadata.zone,
            "InstanceMetadata"
        );
        Ok(metadata)
    }
}
