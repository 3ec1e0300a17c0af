//! # Domain Entities for the Ownership Ledger
//!
//! ## Type Decisions
//!
//! - `Partition` wraps a name. Partitions are compared by name; the default
//!   partition is named [`DEFAULT_PARTITION_NAME`].
//! - Balances are `u128` base units (see `shared_types::Amount`).

use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount};
use std::fmt;

/// Name of the partition every ledger starts with.
pub const DEFAULT_PARTITION_NAME: &str = "default";

/// Named subdivision of a holder's balance.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Partition(String);

impl Partition {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The partition that always exists.
    pub fn default_partition() -> Self {
        Self(DEFAULT_PARTITION_NAME.to_string())
    }

    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_PARTITION_NAME
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Partition {
    fn default() -> Self {
        Self::default_partition()
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One (holder, partition, amount) row of the balance table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceEntry {
    pub holder: Address,
    pub partition: Partition,
    pub amount: Amount,
}

/// Outcome of a transfer pre-validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferStatus {
    /// The transfer would succeed
    Success,
    /// Aggregate balance is short
    InsufficientBalance,
    /// Receiver is the zero address or not whitelisted
    InvalidReceiver,
    /// Named partition balance is short
    InsufficientPartitionBalance,
    /// Amount is zero
    InvalidAmount,
}

impl TransferStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, TransferStatus::Success)
    }
}

/// Which path moved the units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferPath {
    /// Holder moving their own units
    Holder,
    /// Authorized operator acting for a holder
    Operator,
    /// Controller override, whitelist bypassed
    Controller,
}

impl TransferPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferPath::Holder => "holder",
            TransferPath::Operator => "operator",
            TransferPath::Controller => "controller",
        }
    }
}

/// Per-partition portion of a transfer or redemption.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionLeg {
    pub partition: Partition,
    pub amount: Amount,
}

/// Result of a successful transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    pub from: Address,
    pub to: Address,
    pub amount: Amount,
    pub path: TransferPath,
    /// Partitions drawn from, in draw order
    pub legs: Vec<PartitionLeg>,
}

/// Configuration for the Ownership Ledger.
#[derive(Clone, Debug)]
pub struct LedgerConfig {
    /// Human-readable asset name.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Display decimals for ownership units.
    pub decimals: u8,
    /// Maximum entries accepted by whitelist batch operations.
    pub max_batch_size: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            name: "Freehold Property Share".to_string(),
            symbol: "FHPS".to_string(),
            decimals: 0,
            max_batch_size: 200,
        }
    }
}
