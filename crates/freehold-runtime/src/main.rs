//! # Freehold Runtime
//!
//! Boots a single asset from `FH_*` environment variables, logs a summary
//! and prints the asset snapshot as JSON.
//!
//! ## Startup Sequence
//!
//! 1. Initialize telemetry (logging and metrics)
//! 2. Load configuration (devnet defaults, environment overrides)
//! 3. Validate configuration and build genesis
//! 4. Verify ledger invariants
//! 5. Print snapshot (stdout) and, with metrics enabled, the Prometheus
//!    exposition (stderr)

use anyhow::{Context, Result};
use tracing::info;

use freehold_runtime::{AssetConfig, FreeholdContainer};
use freehold_telemetry::{encode_metrics, init_telemetry, TelemetryConfig};
use shared_types::address_hex;

/// Load configuration from the environment on top of devnet defaults.
fn load_config() -> Result<AssetConfig> {
    AssetConfig::devnet()
        .with_overrides(|var| std::env::var(var).ok())
        .context("Failed to load asset configuration")
}

fn main() -> Result<()> {
    let telemetry_config = TelemetryConfig::from_env();
    let metrics_enabled = telemetry_config.metrics_enabled;
    let _telemetry =
        init_telemetry(telemetry_config).context("Failed to initialize telemetry")?;

    let config = load_config()?;
    info!("===========================================");
    info!("  Freehold Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("  Asset: {} ({})", config.name, config.symbol);
    info!("===========================================");

    let container = FreeholdContainer::new(config).context("Failed to build genesis")?;
    container
        .verify_invariants()
        .context("Ledger invariants violated at genesis")?;

    let snapshot = container.snapshot();
    info!(
        admin = %address_hex(&container.config.admin),
        total_supply = snapshot.total_supply,
        current_price = snapshot.current_price,
        registered_holders = snapshot.registered_holders.len(),
        events = container.drain_events().len(),
        "Asset ready"
    );

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    if metrics_enabled {
        eprint!("{}", encode_metrics().context("Failed to encode metrics")?);
    }
    Ok(())
}
