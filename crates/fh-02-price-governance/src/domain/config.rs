//! Configuration for Price Governance.

use serde::{Deserialize, Serialize};

/// Price Governance configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceConfig {
    /// Maximum deviation from the current price, in basis points (5000 = 50%)
    pub max_deviation_bps: u128,
    /// Maximum justification length, in characters
    pub max_justification_len: usize,
    /// Highest accepted confidence score
    pub max_confidence: u8,
    /// Upper bound on records returned by one paginated query
    pub max_page_size: usize,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            max_deviation_bps: 5_000,
            max_justification_len: 512,
            max_confidence: 100,
            max_page_size: 100,
        }
    }
}
