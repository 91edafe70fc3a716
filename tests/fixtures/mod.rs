// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for hivelocity-instances
//!
//! Deterministic device inventories and nodes. Device ids, addresses and
//! facility codes are fixed constants so every test sees the same snapshot.

#![allow(dead_code)]

use hivelocity_instances::adapters::InMemoryInventory;
use hivelocity_instances::domain::{Device, NodeDescriptor};

pub const DEVICE_ID: i32 = 14730;
pub const UNKNOWN_DEVICE_ID: i32 = 9999999;
pub const OTHER_DEVICE_ID: i32 = 14731;

pub const NODE_NAME: &str = "myNode";
pub const OTHER_NODE_NAME: &str = "otherNode";

pub const PRIMARY_IP: &str = "66.165.243.74";
pub const LOCATION: &str = "LAX2";
pub const INSTANCE_TYPE: &str = "bare-metal-x";

/// Powered-on device carrying both the instance-type and machine-name tags
pub fn tagged_device() -> Device {
    Device::new(DEVICE_ID)
        .with_hostname("myNode.example.com")
        .with_power_status("ON")
        .with_primary_ip(PRIMARY_IP)
        .with_location(LOCATION)
        .with_tag(format!("instance-type={}", INSTANCE_TYPE))
        .with_tag(format!("caphv-machine-name={}", NODE_NAME))
        .with_tag("caphv-use=cluster")
}

/// Device provisioned for another node
pub fn other_device() -> Device {
    Device::new(OTHER_DEVICE_ID)
        .with_power_status("OFF")
        .with_primary_ip("66.165.243.75")
        .with_location("DAL1")
        .with_tag("instance-type=bare-metal-y")
        .with_tag(format!("caphv-machine-name={}", OTHER_NODE_NAME))
}

pub fn inventory() -> InMemoryInventory {
    InMemoryInventory::new([other_device(), tagged_device()])
}

pub fn node_with_provider_id(device_id: i32) -> NodeDescriptor {
    NodeDescriptor::new(NODE_NAME).with_provider_id(format!("hivelocity://{}", device_id))
}

/// Node registering for the first time, before a provider id is assigned
pub fn unregistered_node(name: &str) -> NodeDescriptor {
    NodeDescriptor::new(name)
}

/// JSON body of `GET bare-metal-devices/14730`
pub fn device_payload() -> serde_json::Value {
    serde_json::json!({
        "deviceId": DEVICE_ID,
        "hostname": "myNode.example.com",
        "powerStatus": "ON",
        "primaryIp": PRIMARY_IP,
        "locationName": LOCATION,
        "tags": [
            format!("instance-type={}", INSTANCE_TYPE),
            format!("caphv-machine-name={}", NODE_NAME)
        ],
        "servicePlan": 12345,
        "orderId": 67890
    })
}
