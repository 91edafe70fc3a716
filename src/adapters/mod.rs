// Copyright (c) 2025 - Cowboy AI, Inc.

//! Device inventory implementations
//!
//! Concrete implementations of the [`DeviceInventory`](crate::inventory::DeviceInventory)
//! trait.

pub mod in_memory;

pub use in_memory::InMemoryInventory;

#[cfg(feature = "hivelocity")]
pub mod hivelocity;

#[cfg(feature = "hivelocity")]
pub use hivelocity::HivelocityClient;
