// Copyright (c) 2025 - Cowboy AI, Inc.
//! Instance Probe
//!
//! Asks the Hivelocity inventory the three instance questions for one node
//! and prints the answers as JSON.
//!
//! Run with: cargo run --bin instance-probe -- <node-name> [provider-id]
//!
//! Prerequisites:
//! 1. Hivelocity API key (via HIVELOCITY_API_KEY environment variable)
//! 2. Optional API URL override (via HIVELOCITY_API_URL)

use anyhow::{Context, Result};
use hivelocity_instances::{
    adapters::HivelocityClient, CallContext, HivelocityInstances, InstanceMetadata, InstancesV2,
    NodeDescriptor, ProviderConfig, ProviderResult,
};
use serde::Serialize;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, warn};

/// Overall deadline for each operation
const PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of one operation: a value or the error message
#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum Outcome<T> {
    Ok(T),
    Error(String),
}

impl<T> From<ProviderResult<T>> for Outcome<T> {
    fn from(result: ProviderResult<T>) -> Self {
        match result {
            Ok(value) => Outcome::Ok(value),
            Err(e) => Outcome::Error(e.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
struct ProbeReport {
    node: NodeDescriptor,
    exists: Outcome<bool>,
    shutdown: Outcome<bool>,
    metadata: Outcome<InstanceMetadata>,
}

fn node_from_args() -> Result<NodeDescriptor> {
    let mut args = std::env::args().skip(1);
    let name = args
        .next()
        .context("usage: instance-probe <node-name> [provider-id]")?;

    let node = NodeDescriptor::new(name);
    Ok(match args.next() {
        Some(provider_id) => node.with_provider_id(provider_id),
        None => node,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let node = node_from_args()?;
    let config = ProviderConfig::from_env().context("Failed to load provider configuration")?;
    info!(base_url = %config.api.base_url, "Configuration loaded");

    let client =
        HivelocityClient::new(config.api.clone()).context("Failed to create Hivelocity client")?;
    let instances = HivelocityInstances::new(client)
        .with_instance_type_tag(config.instance_type_key())
        .with_machine_name_tag(config.machine_name_key());

    let (cancel_tx, cancel_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling probe");
            let _ = cancel_tx.send(true);
        }
    });

    let ctx = CallContext::background()
        .with_cancellation(cancel_rx)
        .with_timeout(PROBE_TIMEOUT);

    info!(node = %node.name, provider_id = ?node.provider_id(), "Probing instance");
    let report = ProbeReport {
        exists: instances.instance_exists(&ctx, &node).await.into(),
        shutdown: instances.instance_shutdown(&ctx, &node).await.into(),
        metadata: instances.instance_metadata(&ctx, &node).await.into(),
        node,
    };

    let json = serde_json::to_string_pretty(&report).context("Failed to encode report")?;
    println!("{}", json);
    Ok(())
}
