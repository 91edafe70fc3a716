// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for instance resolution

use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::domain::{DeviceId, ProviderIdError, TagError};
use crate::inventory::InventoryError;

/// Orchestrator entry point an error was raised from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    InstanceExists,
    InstanceShutdown,
    InstanceMetadata,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::InstanceExists => "InstanceExists",
            Operation::InstanceShutdown => "InstanceShutdown",
            Operation::InstanceMetadata => "InstanceMetadata",
        };
        f.write_str(name)
    }
}

/// Inventory call in flight when a remote error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InventoryCall {
    FetchDevice,
    ListDevices,
}

impl fmt::Display for InventoryCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InventoryCall::FetchDevice => f.write_str("FetchDevice"),
            InventoryCall::ListDevices => f.write_str("ListDevices"),
        }
    }
}

/// Closed set of error kinds, for branching without string comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingPrefix,
    MalformedInteger,
    TagNotFound,
    InvalidValue,
    AmbiguousTag,
    NoDeviceFound,
    UnknownPowerStatus,
    NodeIsNil,
    RemoteUnavailable,
    Cancelled,
    DeadlineExceeded,
}

/// Errors that can occur while answering an instance query
///
/// Every variant names the entry operation and, where known, the node and
/// device, so a failure can be diagnosed without re-querying the inventory.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The node's provider id could not be decoded
    #[error("{operation}: node {node:?}: {source}")]
    InvalidProviderId {
        operation: Operation,
        node: String,
        #[source]
        source: ProviderIdError,
    },

    /// A required device tag is missing, ambiguous or invalid
    #[error("{operation}: node {node:?} device {device_id}: {source}")]
    Tag {
        operation: Operation,
        node: String,
        device_id: DeviceId,
        #[source]
        source: TagError,
    },

    /// Resolution found no device for the node
    #[error("{operation}: no device found for node {node:?}")]
    NoDeviceFound { operation: Operation, node: String },

    /// Device power status is neither ON nor OFF
    #[error("{operation}: node {node:?} device {device_id} has unknown power status {status:?}")]
    UnknownPowerStatus {
        operation: Operation,
        node: String,
        device_id: DeviceId,
        status: String,
    },

    /// Node carries neither a name nor a provider id
    #[error("{operation}: node is nil")]
    NodeIsNil { operation: Operation },

    /// The inventory call failed
    #[error("{operation}: {call} failed for node {node:?}{}: {source}", device_suffix(.device_id))]
    RemoteUnavailable {
        operation: Operation,
        call: InventoryCall,
        node: String,
        device_id: Option<DeviceId>,
        #[source]
        source: InventoryError,
    },

    /// The caller cancelled while the inventory call was in flight
    #[error("{operation}: {call} cancelled for node {node:?}{}", device_suffix(.device_id))]
    Cancelled {
        operation: Operation,
        call: InventoryCall,
        node: String,
        device_id: Option<DeviceId>,
    },

    /// The inventory call outlived the caller's deadline
    #[error(
        "{operation}: {call} for node {node:?}{} exceeded deadline of {timeout:?}",
        device_suffix(.device_id)
    )]
    DeadlineExceeded {
        operation: Operation,
        call: InventoryCall,
        node: String,
        device_id: Option<DeviceId>,
        timeout: Duration,
    },
}

fn device_suffix(device_id: &Option<DeviceId>) -> String {
    match device_id {
        Some(id) => format!(" (device {})", id),
        None => String::new(),
    }
}

impl ProviderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProviderError::InvalidProviderId { source, .. } => match source {
                ProviderIdError::MissingPrefix { .. } => ErrorKind::MissingPrefix,
                ProviderIdError::MalformedInteger { .. } => ErrorKind::MalformedInteger,
            },
            ProviderError::Tag { source, .. } => match source {
                TagError::NotFound { .. } => ErrorKind::TagNotFound,
                TagError::InvalidValue { .. } => ErrorKind::InvalidValue,
                TagError::AmbiguousTag { .. } => ErrorKind::AmbiguousTag,
            },
            ProviderError::NoDeviceFound { .. } => ErrorKind::NoDeviceFound,
            ProviderError::UnknownPowerStatus { .. } => ErrorKind::UnknownPowerStatus,
            ProviderError::NodeIsNil { .. } => ErrorKind::NodeIsNil,
            ProviderError::RemoteUnavailable { .. } => ErrorKind::RemoteUnavailable,
            ProviderError::Cancelled { .. } => ErrorKind::Cancelled,
            ProviderError::DeadlineExceeded { .. } => ErrorKind::DeadlineExceeded,
        }
    }
}

/// Result type for instance queries
pub type ProviderResult<T> = Result<T, ProviderError>;
