//! Prometheus metrics for the Freehold subsystems.
//!
//! All metrics follow the naming convention: `fh_<subsystem>_<metric>_<unit>`
//!
//! Metrics are process-global. Subsystems update them unconditionally;
//! [`register_metrics`] only decides whether they are exported through
//! [`REGISTRY`].

use lazy_static::lazy_static;
use prometheus::{Counter, CounterVec, Encoder, Gauge, Opts, Registry, TextEncoder};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // OWNERSHIP LEDGER METRICS (Subsystem 1)
    // =========================================================================

    /// Transfers by path (holder, operator, controller)
    pub static ref LEDGER_TRANSFERS: CounterVec = CounterVec::new(
        Opts::new("fh_ledger_transfers_total", "Completed unit transfers"),
        &["path"]
    ).expect("metric creation failed");

    /// Issuance operations
    pub static ref LEDGER_ISSUANCES: Counter = Counter::new(
        "fh_ledger_issuances_total",
        "Completed issuance operations"
    ).expect("metric creation failed");

    /// Redemptions by path (holder, operator, controller)
    pub static ref LEDGER_REDEMPTIONS: CounterVec = CounterVec::new(
        Opts::new("fh_ledger_redemptions_total", "Completed redemptions"),
        &["path"]
    ).expect("metric creation failed");

    /// Current total supply
    pub static ref LEDGER_TOTAL_SUPPLY: Gauge = Gauge::new(
        "fh_ledger_total_supply_units",
        "Current total supply of ownership units"
    ).expect("metric creation failed");

    // =========================================================================
    // PRICE GOVERNANCE METRICS (Subsystem 2)
    // =========================================================================

    /// Recommendations by outcome (submitted, accepted, rejected)
    pub static ref GOVERNANCE_RECOMMENDATIONS: CounterVec = CounterVec::new(
        Opts::new("fh_governance_recommendations_total", "Recommendation lifecycle transitions"),
        &["outcome"]
    ).expect("metric creation failed");

    /// Current accepted price
    pub static ref GOVERNANCE_CURRENT_PRICE: Gauge = Gauge::new(
        "fh_governance_current_price",
        "Currently accepted periodic price"
    ).expect("metric creation failed");

    // =========================================================================
    // YIELD DISTRIBUTION METRICS (Subsystem 3)
    // =========================================================================

    /// Rental payments received
    pub static ref DISTRIBUTION_PAYMENTS: Counter = Counter::new(
        "fh_distribution_payments_total",
        "Rental payments accepted into the pool"
    ).expect("metric creation failed");

    /// Undistributed pool balance
    pub static ref DISTRIBUTION_POOL: Gauge = Gauge::new(
        "fh_distribution_pool_amount",
        "Funds awaiting distribution"
    ).expect("metric creation failed");

    /// Completed distributions
    pub static ref DISTRIBUTIONS_COMPLETED: Counter = Counter::new(
        "fh_distribution_completed_total",
        "Completed yield distributions"
    ).expect("metric creation failed");

    /// Registered holders
    pub static ref DISTRIBUTION_REGISTERED_HOLDERS: Gauge = Gauge::new(
        "fh_distribution_registered_holders",
        "Holders registered for payouts"
    ).expect("metric creation failed");

    // =========================================================================
    // ERROR METRICS
    // =========================================================================

    /// Rejected operations by subsystem and error kind
    pub static ref SUBSYSTEM_ERRORS: CounterVec = CounterVec::new(
        Opts::new("fh_subsystem_errors_total", "Rejected operations by subsystem and error kind"),
        &["subsystem", "error_type"]
    ).expect("metric creation failed");
}

/// Handle for the registered metrics
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Ledger
        Box::new(LEDGER_TRANSFERS.clone()),
        Box::new(LEDGER_ISSUANCES.clone()),
        Box::new(LEDGER_REDEMPTIONS.clone()),
        Box::new(LEDGER_TOTAL_SUPPLY.clone()),
        // Governance
        Box::new(GOVERNANCE_RECOMMENDATIONS.clone()),
        Box::new(GOVERNANCE_CURRENT_PRICE.clone()),
        // Distribution
        Box::new(DISTRIBUTION_PAYMENTS.clone()),
        Box::new(DISTRIBUTION_POOL.clone()),
        Box::new(DISTRIBUTIONS_COMPLETED.clone()),
        Box::new(DISTRIBUTION_REGISTERED_HOLDERS.clone()),
        // Errors
        Box::new(SUBSYSTEM_ERRORS.clone()),
    ];

    for metric in metrics {
        REGISTRY
            .register(metric)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Count a rejected operation.
pub fn record_error(subsystem: &str, error_type: &str) {
    SUBSYSTEM_ERRORS
        .with_label_values(&[subsystem, error_type])
        .inc();
}

/// Lossy conversion for gauge values. Amounts beyond f64 precision are
/// rounded, which is acceptable for dashboards.
pub fn amount_to_gauge(amount: u128) -> f64 {
    amount as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_metrics() {
        // May fail if already registered, which is fine
        let _ = register_metrics();
        assert!(encode_metrics().is_ok());
    }

    #[test]
    fn test_counter_increment() {
        LEDGER_ISSUANCES.inc();
        assert!(LEDGER_ISSUANCES.get() >= 1.0);
    }

    #[test]
    fn test_gauge_set() {
        GOVERNANCE_CURRENT_PRICE.set(2100.0);
        assert_eq!(GOVERNANCE_CURRENT_PRICE.get(), 2100.0);
    }

    #[test]
    fn test_record_error_labels() {
        record_error("ledger", "not_whitelisted");
        let count = SUBSYSTEM_ERRORS
            .with_label_values(&["ledger", "not_whitelisted"])
            .get();
        assert!(count >= 1.0);
    }
}
