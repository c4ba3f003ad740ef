//! # Wallet Hub
//!
//! Entry point for the wallet hub.
//!
//! ## Startup Sequence
//!
//! 1. Initialize telemetry (logging, metrics)
//! 2. Load and validate configuration from the environment
//! 3. Build the container and start background work
//! 4. Run until Ctrl+C, then shut down

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use wallet_runtime::adapters::InMemoryCandidateStore;
use wallet_runtime::{RuntimeConfig, WalletRuntime};
use wallet_telemetry::{init_telemetry, TelemetryConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let telemetry = TelemetryConfig::from_env();
    init_telemetry(&telemetry).context("failed to initialize telemetry")?;
    info!(service = %telemetry.service_name, "Telemetry initialized");

    let config = RuntimeConfig::from_env().context("failed to load configuration")?;

    // Candidate outputs are pushed in by the embedding wallet.
    let candidates = Arc::new(InMemoryCandidateStore::new());
    let runtime = WalletRuntime::new(config, candidates).context("failed to build runtime")?;
    runtime.start().context("failed to start runtime")?;

    info!("Wallet hub is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    runtime.shutdown().await;
    Ok(())
}
