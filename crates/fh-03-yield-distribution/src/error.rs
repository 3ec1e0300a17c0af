//! Error types for the Yield Distribution subsystem

use shared_types::{AccessError, Address, Amount};
use thiserror::Error;

/// Failures reported by a [`PaymentVault`](crate::ports::PaymentVault).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VaultError {
    #[error("Payer 0x{} has {available}, needs {required}", hex::encode(.payer))]
    InsufficientFunds {
        payer: Address,
        required: Amount,
        available: Amount,
    },

    #[error("Custody holds {available}, batch needs {required}")]
    InsufficientCustody { required: Amount, available: Amount },

    #[error("Vault rejected the operation: {0}")]
    Rejected(String),
}

/// Yield Distribution errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistributionError {
    /// Caller lacks the role required by the operation
    #[error("Unauthorized: {0}")]
    Unauthorized(#[from] AccessError),

    /// Zero payment or valuation
    #[error("Invalid amount: must be greater than zero")]
    InvalidAmount,

    /// Zero address where a holder is required
    #[error("Invalid address: the zero address is not allowed")]
    InvalidAddress,

    /// Payment below the governed current price
    #[error("Payment {amount} below expected price {expected}")]
    PaymentBelowExpectedPrice { amount: Amount, expected: Amount },

    /// Vault could not collect the payment
    #[error("Payment transfer failed: {0}")]
    PaymentTransferFailed(VaultError),

    #[error("Distribution pool is empty")]
    DistributionPoolEmpty,

    #[error("No registered holders")]
    NoRegisteredHolders,

    /// Ledger reports zero total supply; shares are undefined
    #[error("Total supply is zero")]
    ZeroTotalSupply,

    /// Self-registration with a zero ledger balance
    #[error("0x{} holds no tokens", hex::encode(.holder))]
    NoTokenBalance { holder: Address },

    /// Registered holder set is full
    #[error("Registered holder limit reached: {limit}")]
    HolderLimitReached { limit: usize },

    #[error("0x{} is not a registered holder", hex::encode(.holder))]
    HolderNotRegistered { holder: Address },

    /// Id is 0 or greater than the number of distributions
    #[error("Invalid distribution id {id} (count {count})")]
    InvalidDistributionId { id: u64, count: u64 },

    /// Mutating call made while another mutating call is in progress on the same thread
    #[error("Reentrant call rejected")]
    ReentrantCall,

    /// Custody balance cannot cover the payouts
    #[error("Insufficient custody: required {required}, available {available}")]
    InsufficientCustody { required: Amount, available: Amount },

    /// Batch disbursement failed; every effect was rolled back
    #[error("Payout failed: {0}")]
    PayoutFailed(VaultError),

    /// Balances reported by the ledger add up to more than the supply
    #[error("Payouts {paid_out} exceed pool {pool}")]
    InconsistentBalances { paid_out: Amount, pool: Amount },

    /// Pool or cumulative total would overflow
    #[error("Arithmetic overflow")]
    ArithmeticOverflow,
}

impl DistributionError {
    /// Stable label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            DistributionError::Unauthorized(_) => "unauthorized",
            DistributionError::InvalidAmount => "invalid_amount",
            DistributionError::InvalidAddress => "invalid_address",
            DistributionError::PaymentBelowExpectedPrice { .. } => "payment_below_expected_price",
            DistributionError::PaymentTransferFailed(_) => "payment_transfer_failed",
            DistributionError::DistributionPoolEmpty => "distribution_pool_empty",
            DistributionError::NoRegisteredHolders => "no_registered_holders",
            DistributionError::ZeroTotalSupply => "zero_total_supply",
            DistributionError::NoTokenBalance { .. } => "no_token_balance",
            DistributionError::HolderLimitReached { .. } => "holder_limit_reached",
            DistributionError::HolderNotRegistered { .. } => "holder_not_registered",
            DistributionError::InvalidDistributionId { .. } => "invalid_distribution_id",
            DistributionError::ReentrantCall => "reentrant_call",
            DistributionError::InsufficientCustody { .. } => "insufficient_custody",
            DistributionError::PayoutFailed(_) => "payout_failed",
            DistributionError::InconsistentBalances { .. } => "inconsistent_balances",
            DistributionError::ArithmeticOverflow => "arithmetic_overflow",
        }
    }
}

/// Result type for distribution operations
pub type DistributionResult<T> = Result<T, DistributionError>;
