//! Configuration for the Yield Distribution engine.

use serde::{Deserialize, Serialize};
use shared_types::Amount;

/// Distribution engine configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionConfig {
    /// Upper bound on the registered holder set; bounds `distribute_yields` work
    pub max_registered_holders: usize,
    /// Asset valuation used for annualised yield, in valuation base units
    pub valuation: Amount,
    /// Decimals of the payment currency
    pub payment_decimals: u8,
    /// Decimals of the valuation figure
    pub valuation_decimals: u8,
    /// Fixed-point scale of `DistributionRecord::per_unit_amount`
    pub unit_scale_decimals: u8,
    /// Upper bound on records returned by `recent_distributions`
    pub max_page_size: usize,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            max_registered_holders: 1_000,
            valuation: 1_000_000,
            payment_decimals: 0,
            valuation_decimals: 0,
            unit_scale_decimals: 18,
            max_page_size: 100,
        }
    }
}
