// Copyright (c) 2025 - Cowboy AI, Inc.
//! Device Resolution
//!
//! Maps a node to the Hivelocity device backing it. The lookup strategy is
//! chosen once per call:
//!
//! ```text
//! NodeDescriptor
//!     │
//!     ├── provider id set ──> ByDeviceId ──> fetch_device(id)
//!     │                                        │
//!     │                          machine-name tag present and different?
//!     │                                        └──> NotFound
//!     │
//!     └── provider id empty ─> ByName ─────> list_devices()
//!                                              │
//!                              first device whose machine-name tag == node name
//! ```
//!
//! Nodes registering for the first time have no provider id yet, so the
//! name-based scan lets the orchestrator identify them through the
//! machine-name tag written at provisioning time.

use tracing::debug;

use crate::context::{CallContext, Interrupted};
use crate::domain::{Device, DeviceId, NodeDescriptor, ProviderId, ProviderIdError, TagKey};
use crate::errors::{InventoryCall, Operation, ProviderError, ProviderResult};
use crate::inventory::{DeviceInventory, InventoryError};

/// Outcome of a successful resolution. Failures are `Err(ProviderError)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(Device),
    NotFound,
}

impl Resolution {
    pub fn device(self) -> Option<Device> {
        match self {
            Resolution::Found(device) => Some(device),
            Resolution::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }
}

/// Lookup strategy for one node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    ByDeviceId(DeviceId),
    ByName(&'a str),
}

impl<'a> Lookup<'a> {
    /// Pick the strategy for `node`, decoding its provider id if it has one
    pub fn for_node(node: &'a NodeDescriptor) -> Result<Self, ProviderIdError> {
        match node.provider_id() {
            Some(provider_id) => ProviderId::parse(provider_id).map(Lookup::ByDeviceId),
            None => Ok(Lookup::ByName(&node.name)),
        }
    }
}

/// Resolves nodes to devices through a [`DeviceInventory`]
#[derive(Debug, Clone)]
pub struct DeviceResolver<I> {
    inventory: I,
    machine_name_tag: TagKey,
}

impl<I: DeviceInventory> DeviceResolver<I> {
    pub fn new(inventory: I) -> Self {
        Self {
            inventory,
            machine_name_tag: TagKey::MACHINE_NAME,
        }
    }

    pub fn with_machine_name_tag(mut self, key: TagKey) -> Self {
        self.machine_name_tag = key;
        self
    }

    /// Resolve `node` on behalf of `operation`, which is recorded in any error
    pub async fn resolve(
        &self,
        operation: Operation,
        ctx: &CallContext,
        node: &NodeDescriptor,
    ) -> ProviderResult<Resolution> {
        let lookup =
            Lookup::for_node(node).map_err(|source| ProviderError::InvalidProviderId {
                operation,
                node: node.name.clone(),
                source,
            })?;

        match lookup {
            Lookup::ByDeviceId(device_id) => {
                self.resolve_by_id(operation, ctx, node, device_id).await
            }
            Lookup::ByName(name) => self.resolve_by_name(operation, ctx, node, name).await,
        }
    }

    async fn resolve_by_id(
        &self,
        operation: Operation,
        ctx: &CallContext,
        node: &NodeDescriptor,
        device_id: DeviceId,
    ) -> ProviderResult<Resolution> {
        let site = CallSite {
            operation,
            call: InventoryCall::FetchDevice,
            node,
            device_id: Some(device_id),
        };
        let fetched = ctx
            .run(self.inventory.fetch_device(device_id))
            .await
            .map_err(|interrupted| site.interrupted(interrupted))?;

        let device = match fetched {
            Ok(device) => device,
            Err(InventoryError::NoSuchDevice(_)) => {
                debug!(node = %node.name, %device_id, "Device not in inventory");
                return Ok(Resolution::NotFound);
            }
            Err(source) => return Err(site.remote(source)),
        };

        // A provider id can outlive its device and be handed to a new
        // machine; a readable name tag naming someone else means stale.
        match device.tag_set().single(&self.machine_name_tag) {
            Ok(name) if name.as_str() != node.name => {
                debug!(
                    node = %node.name,
                    %device_id,
                    tagged_name = %name,
                    "Device is tagged for a different machine"
                );
                Ok(Resolution::NotFound)
            }
            Ok(_) => Ok(Resolution::Found(device)),
            Err(err) => {
                debug!(node = %node.name, %device_id, error = %err, "Matched by provider id alone");
                Ok(Resolution::Found(device))
            }
        }
    }

    async fn resolve_by_name(
        &self,
        operation: Operation,
        ctx: &CallContext,
        node: &NodeDescriptor,
        name: &str,
    ) -> ProviderResult<Resolution> {
        let site = CallSite {
            operation,
            call: InventoryCall::ListDevices,
            node,
            device_id: None,
        };
        let devices = ctx
            .run(self.inventory.list_devices())
            .await
            .map_err(|interrupted| site.interrupted(interrupted))?
            .map_err(|source| site.remote(source))?;

        let scanned = devices.len();
        let found = devices.into_iter().find(|device| {
            match device.tag_set().single(&self.machine_name_tag) {
                Ok(tagged) => tagged.as_str() == name,
                Err(err) => {
                    debug!(device_id = %device.device_id, error = %err, "Skipping unnamed device");
                    false
                }
            }
        });

        match found {
            Some(device) => {
                debug!(node = %name, device_id = %device.device_id, "Resolved node by machine name");
                Ok(Resolution::Found(device))
            }
            None => {
                debug!(node = %name, scanned, "No device carries this machine name");
                Ok(Resolution::NotFound)
            }
        }
    }
}

/// Where an inventory call was made from, for error context
struct CallSite<'a> {
    operation: Operation,
    call: InventoryCall,
    node: &'a NodeDescriptor,
    device_id: Option<DeviceId>,
}

impl CallSite<'_> {
    fn remote(&self, source: InventoryError) -> ProviderError {
        ProviderError::RemoteUnavailable {
            operation: self.operation,
            call: self.call,
            node: self.node.name.clone(),
            device_id: self.device_id,
            source,
        }
    }

    fn interrupted(&self, interrupted: Interrupted) -> ProviderError {
        match interrupted {
            Interrupted::Cancelled => ProviderError::Cancelled {
                operation: self.operation,
                call: self.call,
                node: self.node.name.clone(),
                device_id: self.device_id,
            },
            Interrupted::DeadlineExceeded(timeout) => ProviderError::DeadlineExceeded {
                operation: self.operation,
                call: self.call,
                node: self.node.name.clone(),
                device_id: self.device_id,
                timeout,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryInventory;
    use crate::errors::ErrorKind;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    fn tagged_device(id: i32, name: &str) -> Device {
        Device::new(id)
            .with_power_status("ON")
            .with_tag(format!("caphv-machine-name={name}"))
    }

    #[test]
    fn test_lookup_strategy() {
        let node = NodeDescriptor::new("myNode");
        assert_eq!(Lookup::for_node(&node).unwrap(), Lookup::ByName("myNode"));

        let node = NodeDescriptor::new("myNode").with_provider_id("hivelocity://7");
        assert_eq!(
            Lookup::for_node(&node).unwrap(),
            Lookup::ByDeviceId(DeviceId::new(7))
        );

        let node = NodeDescriptor::new("myNode").with_provider_id("7");
        assert!(matches!(
            Lookup::for_node(&node),
            Err(ProviderIdError::MissingPrefix { .. })
        ));
    }

    #[tokio::test]
    async fn test_by_id_found() {
        let resolver = DeviceResolver::new(InMemoryInventory::new([tagged_device(1, "myNode")]));
        let node = NodeDescriptor::new("myNode").with_provider_id("hivelocity://1");

        let resolution = resolver
            .resolve(Operation::InstanceExists, &CallContext::background(), &node)
            .await
            .unwrap();
        assert_eq!(resolution, Resolution::Found(tagged_device(1, "myNode")));
    }

    #[tokio::test]
    async fn test_by_id_name_mismatch_is_not_found() {
        let resolver = DeviceResolver::new(InMemoryInventory::new([tagged_device(1, "other")]));
        let node = NodeDescriptor::new("myNode").with_provider_id("hivelocity://1");

        let resolution = resolver
            .resolve(Operation::InstanceExists, &CallContext::background(), &node)
            .await
            .unwrap();
        assert_eq!(resolution, Resolution::NotFound);
    }

    #[tokio::test]
    async fn test_by_id_without_name_tag_matches() {
        let untagged = Device::new(1).with_tag("instance-type=x");
        let ambiguous = Device::new(2)
            .with_tag("caphv-machine-name=a")
            .with_tag("caphv-machine-name=b");
        let resolver = DeviceResolver::new(InMemoryInventory::new([untagged, ambiguous]));

        for id in [1, 2] {
            let node = NodeDescriptor::new("myNode").with_provider_id(format!("hivelocity://{id}"));
            let resolution = resolver
                .resolve(Operation::InstanceExists, &CallContext::background(), &node)
                .await
                .unwrap();
            assert!(resolution.is_found(), "device {id} should match by id alone");
        }
    }

    #[tokio::test]
    async fn test_by_id_invalid_name_tag_still_matches() {
        let resolver = DeviceResolver::new(InMemoryInventory::new([
            Device::new(1).with_tag("caphv-machine-name=&")
        ]));
        let node = NodeDescriptor::new("myNode").with_provider_id("hivelocity://1");

        let resolution = resolver
            .resolve(Operation::InstanceExists, &CallContext::background(), &node)
            .await
            .unwrap();
        assert_eq!(
            resolution,
            Resolution::Found(Device::new(1).with_tag("caphv-machine-name=&"))
        );
    }

    #[tokio::test]
    async fn test_invalid_provider_id_names_operation() {
        let resolver = DeviceResolver::new(InMemoryInventory::default());
        let node = NodeDescriptor::new("myNode").with_provider_id("hivelocity://x");

        let err = resolver
            .resolve(Operation::InstanceMetadata, &CallContext::background(), &node)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInteger);
        assert!(matches!(
            err,
            ProviderError::InvalidProviderId {
                operation: Operation::InstanceMetadata,
                ..
            }
        ));
    }

    struct Unavailable;

    #[async_trait]
    impl DeviceInventory for Unavailable {
        async fn fetch_device(&self, _device_id: DeviceId) -> Result<Device, InventoryError> {
            Err(InventoryError::Transport("connection reset".to_string()))
        }

        async fn list_devices(&self) -> Result<Vec<Device>, InventoryError> {
            Err(InventoryError::Transport("connection reset".to_string()))
        }
    }

    #[tokio::test]
    async fn test_remote_errors_carry_call_site() {
        let resolver = DeviceResolver::new(Unavailable);
        let ctx = CallContext::background();

        let by_id = NodeDescriptor::new("myNode").with_provider_id("hivelocity://14730");
        let err = resolver
            .resolve(Operation::InstanceShutdown, &ctx, &by_id)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ProviderError::RemoteUnavailable {
                operation: Operation::InstanceShutdown,
                call: InventoryCall::FetchDevice,
                device_id: Some(id),
                ..
            } if id == DeviceId::new(14730)
        ));

        let err = resolver
            .resolve(Operation::InstanceExists, &ctx, &NodeDescriptor::new("myNode"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ProviderError::RemoteUnavailable {
                operation: Operation::InstanceExists,
                call: InventoryCall::ListDevices,
                device_id: None,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_by_id_unknown_device() {
        let resolver = DeviceResolver::new(InMemoryInventory::default());
        let node = NodeDescriptor::new("myNode").with_provider_id("hivelocity://9999999");

        let resolution = resolver
            .resolve(Operation::InstanceExists, &CallContext::background(), &node)
            .await
            .unwrap();
        assert_eq!(resolution, Resolution::NotFound);
    }

    #[tokio::test]
    async fn test_by_name_first_match_wins() {
        let resolver = DeviceResolver::new(InMemoryInventory::new([
            Device::new(1).with_tag("standalone"),
            tagged_device(2, "other"),
            tagged_device(3, "myNode"),
            tagged_device(4, "myNode"),
        ]));
        let node = NodeDescriptor::new("myNode");

        let device = resolver
            .resolve(Operation::InstanceExists, &CallContext::background(), &node)
            .await
            .unwrap()
            .device()
            .unwrap();
        assert_eq!(device.device_id, DeviceId::new(3));
    }

    #[tokio::test]
    async fn test_by_name_skips_unparsable_tags() {
        let resolver = DeviceResolver::new(InMemoryInventory::new([
            Device::new(1)
                .with_tag("caphv-machine-name=myNode")
                .with_tag("caphv-machine-name=myNode"),
            Device::new(2).with_tag("caphv-machine-name=my Node"),
        ]));
        let node = NodeDescriptor::new("myNode");

        let resolution = resolver
            .resolve(Operation::InstanceExists, &CallContext::background(), &node)
            .await
            .unwrap();
        assert_eq!(resolution, Resolution::NotFound);
    }

    #[tokio::test]
    async fn test_custom_machine_name_tag() {
        let resolver = DeviceResolver::new(InMemoryInventory::new([
            Device::new(5).with_tag("machine=myNode")
        ]))
        .with_machine_name_tag(TagKey::new("machine"));

        let resolution = resolver
            .resolve(
                Operation::InstanceExists,
                &CallContext::background(),
                &NodeDescriptor::new("myNode"),
            )
            .await
            .unwrap();
        assert!(resolution.is_found());
    }
}
