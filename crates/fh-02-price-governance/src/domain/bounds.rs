//! Deviation bound around the current price.

use serde::{Deserialize, Serialize};
use shared_types::{mul_div_floor, Amount, BASIS_POINTS};

/// Inclusive `[min, max]` range a recommendation must fall in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBounds {
    pub min: Amount,
    pub max: Amount,
}

impl PriceBounds {
    /// `[floor(current × (10000 − d) / 10000), floor(current × (10000 + d) / 10000)]`
    ///
    /// `d` above 10000 bps clamps the lower bound at 0. An upper bound that
    /// does not fit in `u128` saturates.
    pub fn around(current: Amount, max_deviation_bps: u128) -> Self {
        let down = BASIS_POINTS.saturating_sub(max_deviation_bps);
        let up = BASIS_POINTS.saturating_add(max_deviation_bps);
        Self {
            min: mul_div_floor(current, down, BASIS_POINTS).unwrap_or(0),
            max: mul_div_floor(current, up, BASIS_POINTS).unwrap_or(Amount::MAX),
        }
    }

    pub fn contains(&self, price: Amount) -> bool {
        self.min <= price && price <= self.max
    }
}
