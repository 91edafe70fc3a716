// Copyright (c) 2025 - Cowboy AI, Inc.
//! Remote Device Inventory
//!
//! The two read operations the resolver needs from the Hivelocity inventory.
//! Implementations live in [`crate::adapters`].

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Device, DeviceId};

/// Inventory operation error
#[derive(Debug, Error)]
pub enum InventoryError {
    /// The inventory has no device with this id
    #[error("no such device: {0}")]
    NoSuchDevice(DeviceId),

    /// Request could not be sent or the connection failed
    #[error("transport error: {0}")]
    Transport(String),

    /// The API answered with an unexpected status
    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body could not be decoded
    #[error("failed to decode response: {0}")]
    Deserialization(String),

    /// Client-side configuration problem (bad header, bad URL)
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<serde_json::Error> for InventoryError {
    fn from(err: serde_json::Error) -> Self {
        InventoryError::Deserialization(err.to_string())
    }
}

/// Read-only access to bare metal devices
#[async_trait]
pub trait DeviceInventory: Send + Sync {
    /// Fetch one device. Must return [`InventoryError::NoSuchDevice`] when the
    /// inventory reports the id as unknown, and another variant otherwise.
    async fn fetch_device(&self, device_id: DeviceId) -> Result<Device, InventoryError>;

    /// List every device visible to the account
    async fn list_devices(&self) -> Result<Vec<Device>, InventoryError>;
}

#[async_trait]
impl<T: DeviceInventory + ?Sized> DeviceInventory for std::sync::Arc<T> {
    async fn fetch_device(&self, device_id: DeviceId) -> Result<Device, InventoryError> {
        (**self).fetch_device(device_id).await
    }

    async fn list_devices(&self) -> Result<Vec<Device>, InventoryError> {
        (**self).list_devices().await
    }
}
