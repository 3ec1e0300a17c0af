//! Outgoing events for Yield Distribution

use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, Role};

/// Events emitted by the distribution engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DistributionEvent {
    PaymentReceived {
        payer: Address,
        amount: Amount,
        pool: Amount,
    },
    HolderRegistered { holder: Address },
    HolderUnregistered { holder: Address },
    YieldsDistributed {
        id: u64,
        total_amount: Amount,
        paid_out: Amount,
        recipient_count: u64,
    },
    /// One per nonzero share
    YieldPaid {
        distribution_id: u64,
        holder: Address,
        amount: Amount,
    },
    ValuationUpdated { previous: Amount, current: Amount },
    RoleGranted { role: Role, account: Address, by: Address },
    RoleRevoked { role: Role, account: Address, by: Address },
}
