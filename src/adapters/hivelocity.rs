// Copyright (c) 2025 - Cowboy AI, Inc.

//! Hivelocity REST Inventory Adapter
//!
//! Implements [`DeviceInventory`] on top of the Hivelocity v2 REST API.
//!
//! ```text
//! fetch_device(id) = GET {base_url}/bare-metal-devices/{id}
//! list_devices()   = GET {base_url}/bare-metal-devices/
//! ```
//!
//! Requests carry the account key in the `X-API-KEY` header. Error responses
//! have the shape `{"code": 404, "message": "Device not found"}`; that
//! message is the only way the API distinguishes an unknown device from other
//! failures, so it is mapped to [`InventoryError::NoSuchDevice`].
//!
//! # Example
//!
//! ```rust,no_run
//! use hivelocity_instances::adapters::HivelocityClient;
//! use hivelocity_instances::config::HivelocityConfig;
//! use hivelocity_instances::inventory::DeviceInventory;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = HivelocityConfig {
//!         api_key: "your-key-here".to_string(),
//!         ..Default::default()
//!     };
//!
//!     let client = HivelocityClient::new(config)?;
//!     for device in client.list_devices().await? {
//!         println!("{} {}", device.device_id, device.power_status);
//!     }
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::HivelocityConfig;
use crate::domain::{Device, DeviceId};
use crate::inventory::{DeviceInventory, InventoryError};

/// Message the API returns for an unknown device id
const DEVICE_NOT_FOUND: &str = "Device not found";

/// Error body returned by the Hivelocity API
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: String,
}

/// Hivelocity inventory client
#[derive(Debug, Clone)]
pub struct HivelocityClient {
    config: HivelocityConfig,
    client: Client,
}

impl HivelocityClient {
    pub fn new(config: HivelocityConfig) -> Result<Self, InventoryError> {
        info!("Creating Hivelocity client for {}", config.base_url);

        let mut headers = HeaderMap::new();
        let mut api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| InventoryError::Configuration(format!("Invalid API key: {}", e)))?;
        api_key.set_sensitive(true);
        headers.insert("X-API-KEY", api_key);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| {
                InventoryError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn get(&self, url: &str) -> Result<Response, InventoryError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            debug!(method = "GET", url = %url, error = %e, "Hivelocity API error");
            InventoryError::Transport(e.to_string())
        })?;

        debug!(method = "GET", url = %url, status = %response.status(), "Hivelocity API called");
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, InventoryError> {
        let body = response
            .bytes()
            .await
            .map_err(|e| InventoryError::Transport(e.to_string()))?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Turn a non-success response into an error, recognising unknown devices
    async fn error_from(response: Response, device_id: Option<DeviceId>) -> InventoryError {
        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => classify_error(status, &body, device_id),
            Err(e) => {
                debug!(status, error = %e, "Failed to read Hivelocity error body");
                InventoryError::Transport(format!("failed to read {} response body: {}", status, e))
            }
        }
    }
}

/// Map an error status and body to an inventory error
fn classify_error(status: u16, body: &str, device_id: Option<DeviceId>) -> InventoryError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => match device_id {
            Some(id) if parsed.message == DEVICE_NOT_FOUND => InventoryError::NoSuchDevice(id),
            _ => {
                debug!(status, code = ?parsed.code, message = %parsed.message, "Hivelocity API rejected request");
                InventoryError::Api {
                    status,
                    message: parsed.message,
                }
            }
        },
        Err(_) => InventoryError::Api {
            status,
            message: body.to_string(),
        },
    }
}

#[async_trait]
impl DeviceInventory for HivelocityClient {
    async fn fetch_device(&self, device_id: DeviceId) -> Result<Device, InventoryError> {
        let url = self.url(&format!("bare-metal-devices/{}", device_id));
        let response = self.get(&url).await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response, Some(device_id)).await);
        }
        Self::decode(response).await
    }

    async fn list_devices(&self) -> Result<Vec<Device>, InventoryError> {
        let url = self.url("bare-metal-devices/");
        let response = self.get(&url).await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response, None).await);
        }
        let devices: Vec<Device> = Self::decode(response).await?;
        debug!(count = devices.len(), "Listed Hivelocity devices");
        Ok(devices)
    }
}
