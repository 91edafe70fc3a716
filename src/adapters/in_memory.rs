// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-memory device inventory
//!
//! Fixed snapshot of devices, for tests and dry runs. Fetch and list read the
//! same snapshot, in insertion order.

use async_trait::async_trait;

use crate::domain::{Device, DeviceId};
use crate::inventory::{DeviceInventory, InventoryError};

#[derive(Debug, Clone, Default)]
pub struct InMemoryInventory {
    devices: Vec<Device>,
}

impl InMemoryInventory {
    pub fn new(devices: impl IntoIterator<Item = Device>) -> Self {
        Self {
            devices: devices.into_iter().collect(),
        }
    }

    pub fn with_device(mut self, device: Device) -> Self {
        self.devices.push(device);
        self
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

#[async_trait]
impl DeviceInventory for InMemoryInventory {
    async fn fetch_device(&self, device_id: DeviceId) -> Result<Device, InventoryError> {
        self.devices
            .iter()
            .find(|device| device.device_id == device_id)
            .cloned()
            .ok_or(InventoryError::NoSuchDevice(device_id))
    }

    async fn list_devices(&self) -> Result<Vec<Device>, InventoryError> {
        Ok(self.devices.clone())
    }
}
