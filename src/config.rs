// Copyright (c) 2025 - Cowboy AI, Inc.

//! Provider configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::TagKey;

/// Environment variable holding the Hivelocity API key
pub const API_KEY_ENV: &str = "HIVELOCITY_API_KEY";
pub const API_URL_ENV: &str = "HIVELOCITY_API_URL";
pub const TIMEOUT_ENV: &str = "HIVELOCITY_TIMEOUT_SECS";
pub const INSTANCE_TYPE_TAG_ENV: &str = "HIVELOCITY_INSTANCE_TYPE_TAG";
pub const MACHINE_NAME_TAG_ENV: &str = "HIVELOCITY_MACHINE_NAME_TAG";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable HIVELOCITY_API_KEY is missing or empty")]
    MissingApiKey,

    #[error("invalid value {value:?} for {name}")]
    InvalidValue { name: &'static str, value: String },
}

/// Hivelocity API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HivelocityConfig {
    /// API base URL (e.g., "https://core.hivelocity.net/api/v2")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Account API key, sent as `X-API-KEY`
    pub api_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://core.hivelocity.net/api/v2".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for HivelocityConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Settings for the instance provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api: HivelocityConfig,

    /// Tag key carrying the instance type
    #[serde(default = "default_instance_type_tag")]
    pub instance_type_tag: String,

    /// Tag key carrying the machine name written at provisioning time
    #[serde(default = "default_machine_name_tag")]
    pub machine_name_tag: String,
}

fn default_instance_type_tag() -> String {
    TagKey::INSTANCE_TYPE.to_string()
}

fn default_machine_name_tag() -> String {
    TagKey::MACHINE_NAME.to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api: HivelocityConfig::default(),
            instance_type_tag: default_instance_type_tag(),
            machine_name_tag: default_machine_name_tag(),
        }
    }
}

impl ProviderConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api: HivelocityConfig {
                api_key: api_key.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.api.timeout_secs = timeout_secs;
        self
    }

    pub fn with_instance_type_tag(mut self, key: impl Into<String>) -> Self {
        self.instance_type_tag = key.into();
        self
    }

    pub fn with_machine_name_tag(mut self, key: impl Into<String>) -> Self {
        self.machine_name_tag = key.into();
        self
    }

    pub fn instance_type_key(&self) -> TagKey {
        TagKey::new(self.instance_type_tag.as_str())
    }

    pub fn machine_name_key(&self) -> TagKey {
        TagKey::new(self.machine_name_tag.as_str())
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV)
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let mut config = Self::new(api_key);

        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.is_empty()) {
            config.api.base_url = url;
        }

        if let Some(raw) = lookup(TIMEOUT_ENV).filter(|v| !v.is_empty()) {
            config.api.timeout_secs = raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidValue {
                    name: TIMEOUT_ENV,
                    value: raw,
                })?;
        }

        if let Some(key) = lookup(INSTANCE_TYPE_TAG_ENV).filter(|v| !v.is_empty()) {
            config.instance_type_tag = key;
        }

        if let Some(key) = lookup(MACHINE_NAME_TAG_ENV).filter(|v| !v.is_empty()) {
            config.machine_name_tag = key;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = ProviderConfig::default();
        assert_eq!(config.api.base_url, "https://core.hivelocity.net/api/v2");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.instance_type_key(), TagKey::INSTANCE_TYPE);
        assert_eq!(config.machine_name_key(), TagKey::MACHINE_NAME);
    }

    #[test]
    fn test_missing_api_key() {
        assert_eq!(
            ProviderConfig::from_lookup(env(&[])).unwrap_err(),
            ConfigError::MissingApiKey
        );
        assert_eq!(
            ProviderConfig::from_lookup(env(&[(API_KEY_ENV, "")])).unwrap_err(),
            ConfigError::MissingApiKey
        );
    }

    #[test]
    fn test_overrides() {
        let config = ProviderConfig::from_lookup(env(&[
            (API_KEY_ENV, "secret"),
            (API_URL_ENV, "http://localhost:9000"),
            (TIMEOUT_ENV, "5"),
            (INSTANCE_TYPE_TAG_ENV, "caphv-device-type"),
        ]))
        .unwrap();

        assert_eq!(config.api.api_key, "secret");
        assert_eq!(config.api.base_url, "http://localhost:9000");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.instance_type_key(), TagKey::new("caphv-device-type"));
        assert_eq!(config.machine_name_key(), TagKey::MACHINE_NAME);
    }

    #[test]
    fn test_invalid_timeout() {
        for raw in ["abc", "0", "-1"] {
            assert_eq!(
                ProviderConfig::from_lookup(env(&[(API_KEY_ENV, "k"), (TIMEOUT_ENV, raw)]))
                    .unwrap_err(),
                ConfigError::InvalidValue {
                    name: TIMEOUT_ENV,
                    value: raw.to_string()
                }
            );
        }
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: ProviderConfig =
            serde_json::from_str(r#"{"api": {"api_key": "k"}}"#).unwrap();
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.machine_name_tag, "caphv-machine-name");
    }
}
