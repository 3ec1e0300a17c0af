//! Distribution records and payout plans.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, Timestamp};

/// One completed distribution. Append-only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionRecord {
    /// Sequential id, starting at 1
    pub id: u64,
    /// Gross pool amount, dust included
    pub total_amount: Amount,
    /// `floor(total_amount × 10^unit_scale_decimals / total_supply)`
    pub per_unit_amount: Amount,
    pub timestamp: Timestamp,
    /// Registered holders considered, zero shares included
    pub recipient_count: u64,
    /// Ledger supply the shares were computed against
    pub total_supply: Amount,
    /// Sum of the shares actually transferred
    pub paid_out: Amount,
}

impl DistributionRecord {
    /// Rounding remainder left in custody.
    pub fn dust(&self) -> Amount {
        self.total_amount - self.paid_out
    }
}

/// One holder's share of a distribution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub holder: Address,
    /// Live ledger balance the share was computed from
    pub balance: Amount,
    /// `floor(pool × balance / total_supply)`
    pub amount: Amount,
}

/// Payouts a distribution would make, computed without side effects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutPlan {
    pub pool: Amount,
    pub total_supply: Amount,
    pub per_unit_amount: Amount,
    /// In registration order, zero shares included
    pub payouts: Vec<Payout>,
    pub paid_out: Amount,
}

impl PayoutPlan {
    pub fn dust(&self) -> Amount {
        self.pool - self.paid_out
    }

    pub fn recipient_count(&self) -> u64 {
        self.payouts.len() as u64
    }

    /// Nonzero shares as `(holder, amount)` transfers.
    pub fn transfers(&self) -> Vec<(Address, Amount)> {
        self.payouts
            .iter()
            .filter(|p| p.amount > 0)
            .map(|p| (p.holder, p.amount))
            .collect()
    }
}
