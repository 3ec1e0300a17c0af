//! Error types for the Ownership Ledger subsystem

use crate::domain::Partition;
use shared_types::{AccessError, Address, Amount};
use thiserror::Error;

/// Ownership Ledger errors
///
/// Every error aborts the whole operation; no state is mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Caller lacks the role required by the operation
    #[error("Unauthorized: {0}")]
    Unauthorized(#[from] AccessError),

    /// Zero amounts are rejected
    #[error("Invalid amount: must be greater than zero")]
    InvalidAmount,

    /// Zero address used where an account is required
    #[error("Invalid address: the zero address is not allowed")]
    InvalidAddress,

    /// Receiver is the zero address
    #[error("Invalid receiver: 0x{}", hex::encode(.receiver))]
    InvalidReceiver { receiver: Address },

    /// Receiver is not on the transfer whitelist
    #[error("Receiver 0x{} is not whitelisted", hex::encode(.receiver))]
    NotWhitelisted { receiver: Address },

    /// Aggregate balance is below the requested amount
    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: Amount, available: Amount },

    /// Balance in the named partition is below the requested amount
    #[error("Insufficient balance in partition {partition}: required {required}, available {available}")]
    InsufficientPartitionBalance {
        partition: Partition,
        required: Amount,
        available: Amount,
    },

    /// Caller is not an authorized operator for the holder
    #[error("0x{} is not an operator for 0x{}", hex::encode(.operator), hex::encode(.holder))]
    NotOperator { operator: Address, holder: Address },

    /// Holders cannot authorize or revoke themselves
    #[error("Holders cannot authorize or revoke themselves as operator")]
    SelfAuthorization,

    /// Issuance has been permanently renounced
    #[error("Issuance has been renounced")]
    IssuanceRenounced,

    /// Controller operations have been permanently renounced
    #[error("Ledger is no longer controllable")]
    NotControllable,

    /// Issuance would overflow total supply
    #[error("Total supply overflow")]
    SupplyOverflow,

    /// Batch exceeds the configured maximum size
    #[error("Batch too large: {size} entries, max {max}")]
    BatchTooLarge { size: usize, max: usize },

    /// Conservation or partition consistency check failed
    #[error("Ledger invariant violated: {reason}")]
    InvariantViolation { reason: String },
}

impl LedgerError {
    /// Stable label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerError::Unauthorized(_) => "unauthorized",
            LedgerError::InvalidAmount => "invalid_amount",
            LedgerError::InvalidAddress => "invalid_address",
            LedgerError::InvalidReceiver { .. } => "invalid_receiver",
            LedgerError::NotWhitelisted { .. } => "not_whitelisted",
            LedgerError::InsufficientBalance { .. } => "insufficient_balance",
            LedgerError::InsufficientPartitionBalance { .. } => "insufficient_partition_balance",
            LedgerError::NotOperator { .. } => "not_operator",
            LedgerError::SelfAuthorization => "self_authorization",
            LedgerError::IssuanceRenounced => "issuance_renounced",
            LedgerError::NotControllable => "not_controllable",
            LedgerError::SupplyOverflow => "supply_overflow",
            LedgerError::BatchTooLarge { .. } => "batch_too_large",
            LedgerError::InvariantViolation { .. } => "invariant_violation",
        }
    }
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
