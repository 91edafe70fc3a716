// Copyright (c) 2025 - Cowboy AI, Inc.
//! Service Layer for Instance Queries
//!
//! Orchestrator-facing entry points. Each call flows through the same
//! pipeline:
//!
//! ```text
//! Orchestrator Request (node, call context)
//!     ↓
//! Service Layer (this module)
//!     ↓
//! DeviceResolver → Resolution
//!     ↓
//! DeviceInventory (Hivelocity REST, in-memory)
//!     ↓
//! Projection → bool / InstanceMetadata
//! ```
//!
//! # Example
//!
//! ```rust
//! use hivelocity_instances::adapters::InMemoryInventory;
//! use hivelocity_instances::context::CallContext;
//! use hivelocity_instances::domain::{Device, NodeDescriptor};
//! use hivelocity_instances::service::{HivelocityInstances, InstancesV2};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let inventory = InMemoryInventory::new([Device::new(14730).with_power_status("ON")]);
//! let instances = HivelocityInstances::new(inventory);
//!
//! let node = NodeDescriptor::new("myNode").with_provider_id("hivelocity://14730");
//! assert!(instances.instance_exists(&CallContext::background(), &node).await?);
//! assert!(!instances.instance_shutdown(&CallContext::background(), &node).await?);
//! # Ok(())
//! # }
//! ```

pub mod instances;

pub use instances::{HivelocityInstances, InstancesV2};
