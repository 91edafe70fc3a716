// Copyright (c) 2025 - Cowboy AI, Inc.
//! Instance Domain Models
//!
//! Value objects and snapshots shared by the resolver and the instance
//! projector. Everything here is pure: no I/O, no shared state.
//!
//! # Value Objects with Invariants
//!
//! - [`DeviceId`] / [`ProviderId`] - `hivelocity://<int32>` identifier codec
//! - [`LabelValue`] - Kubernetes label-value rules
//! - [`TagKey`] / [`TagSet`] - `key=value` device tags parsed into a multimap
//!
//! # Snapshots
//!
//! - [`Device`] - bare metal device as read from the inventory
//! - [`NodeDescriptor`] - orchestrator node, borrowed per call
//! - [`InstanceMetadata`] - canonical metadata handed back to the orchestrator

pub mod device;
pub mod label;
pub mod metadata;
pub mod node;
pub mod provider_id;
pub mod tags;

pub use device::{Device, PowerStatus};
pub use label::{LabelError, LabelValue};
pub use metadata::{InstanceMetadata, NodeAddress, NodeAddressType};
pub use node::NodeDescriptor;
pub use provider_id::{DeviceId, ProviderId, ProviderIdError, PROVIDER_PREFIX};
pub use tags::{extract, TagError, TagKey, TagSet};
