//! Outgoing events for Price Governance

use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, Role};

/// Events emitted by Price Governance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GovernanceEvent {
    RecommendationSubmitted {
        id: u64,
        price: Amount,
        confidence: u8,
        submitter: Address,
    },
    RecommendationAccepted { id: u64, price: Amount, by: Address },
    RecommendationRejected { id: u64, price: Amount, by: Address },
    /// Emitted together with `RecommendationAccepted`
    PriceUpdated {
        previous: Amount,
        current: Amount,
        recommendation_id: u64,
    },
    RoleGranted { role: Role, account: Address, by: Address },
    RoleRevoked { role: Role, account: Address, by: Address },
}
