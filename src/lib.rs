// Copyright (c) 2025 - Cowboy AI, Inc.
//! Hivelocity instance provider
//!
//! Answers an orchestrator's instance questions (does the machine backing a
//! node exist, is it powered off, what metadata describes it) against the
//! Hivelocity bare-metal device inventory.
//!
//! - [`domain`]: provider ids, labels, tags, devices and metadata
//! - [`inventory`]: the read-only inventory seam
//! - [`adapters`]: REST and in-memory inventories
//! - [`resolver`]: node to device resolution
//! - [`service`]: the three orchestrator operations
//! - [`context`]: cancellation and deadlines for a single call

pub mod adapters;
pub mod config;
pub mod context;
pub mod domain;
pub mod errors;
pub mod inventory;
pub mod resolver;
pub mod service;

// Re-export commonly used types
pub use config::{ConfigError, HivelocityConfig, ProviderConfig};
pub use context::CallContext;
pub use domain::{Device, DeviceId, InstanceMetadata, NodeDescriptor, ProviderId};
pub use errors::{ErrorKind, InventoryCall, Operation, ProviderError, ProviderResult};
pub use inventory::{DeviceInventory, InventoryError};
pub use resolver::{DeviceResolver, Resolution};
pub use service::{HivelocityInstances, InstancesV2};
