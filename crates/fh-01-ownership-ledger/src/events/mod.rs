//! Outgoing events for the Ownership Ledger
//!
//! Every successful mutation appends one event. Consumers drain them with
//! `OwnershipLedger::take_events`.

use crate::domain::{Partition, PartitionLeg};
use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, Role};

/// Events emitted by the Ownership Ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// Holder or operator transfer
    Transferred {
        operator: Address,
        from: Address,
        to: Address,
        amount: Amount,
        legs: Vec<PartitionLeg>,
    },
    /// New units minted
    Issued {
        issuer: Address,
        to: Address,
        partition: Partition,
        amount: Amount,
    },
    /// Holder or operator redemption
    Redeemed {
        operator: Address,
        from: Address,
        amount: Amount,
        legs: Vec<PartitionLeg>,
    },
    /// Forced transfer
    ControllerTransferred {
        controller: Address,
        from: Address,
        to: Address,
        amount: Amount,
        legs: Vec<PartitionLeg>,
    },
    /// Forced redemption
    ControllerRedeemed {
        controller: Address,
        from: Address,
        amount: Amount,
        legs: Vec<PartitionLeg>,
    },
    /// `partition` is `None` for global authorizations
    OperatorAuthorized {
        owner: Address,
        operator: Address,
        partition: Option<Partition>,
    },
    OperatorRevoked {
        owner: Address,
        operator: Address,
        partition: Option<Partition>,
    },
    WhitelistUpdated { address: Address, eligible: bool },
    ControlRenounced { by: Address },
    IssuanceRenounced { by: Address },
    RoleGranted { role: Role, account: Address, by: Address },
    RoleRevoked { role: Role, account: Address, by: Address },
}
