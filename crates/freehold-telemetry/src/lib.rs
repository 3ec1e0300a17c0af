//! # Freehold Telemetry
//!
//! Logging and metrics for the Freehold subsystems.
//!
//! ## Components
//!
//! - **Logging**: `tracing-subscriber` with env filtering, pretty or JSON output
//! - **Metrics**: Prometheus counters and gauges updated by every subsystem
//!
//! ## Usage
//!
//! ```rust,ignore
//! use freehold_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let _guard = init_telemetry(TelemetryConfig::from_env())?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `FH_LOG_LEVEL` | `info` | Log level filter |
//! | `FH_LOG_FORMAT` | `pretty` | `pretty` or `json` |
//! | `FH_METRICS_ENABLED` | `true` | Register Prometheus metrics |

mod config;
mod logging;
pub mod metrics;

pub use config::{LogFormat, TelemetryConfig};
pub use logging::init_logging;
pub use metrics::{
    encode_metrics, record_error, register_metrics, MetricsHandle, DISTRIBUTIONS_COMPLETED,
    DISTRIBUTION_PAYMENTS, DISTRIBUTION_POOL, DISTRIBUTION_REGISTERED_HOLDERS,
    GOVERNANCE_CURRENT_PRICE, GOVERNANCE_RECOMMENDATIONS, LEDGER_ISSUANCES, LEDGER_REDEMPTIONS,
    LEDGER_TOTAL_SUPPLY, LEDGER_TRANSFERS, SUBSYSTEM_ERRORS,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and, if enabled, metrics registration.
///
/// Hold the returned guard until the process exits.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let metrics = if config.metrics_enabled {
        Some(register_metrics()?)
    } else {
        None
    };

    init_logging(&config)?;

    Ok(TelemetryGuard { _metrics: metrics })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    _metrics: Option<MetricsHandle>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::debug!("Telemetry guard dropped");
    }
}
