//! Domain module for the Ownership Ledger
//!
//! - balances: partitioned balance table and draw-down planning
//! - entities: partitions, transfer status, receipts, config
//! - flags: one-way capability flags
//! - operators: operator authorizations
//! - whitelist: transfer eligibility

pub mod balances;
pub mod entities;
pub mod flags;
pub mod operators;
pub mod whitelist;

pub use balances::PartitionedBalances;
pub use entities::{
    BalanceEntry, LedgerConfig, Partition, PartitionLeg, TransferPath, TransferReceipt,
    TransferStatus, DEFAULT_PARTITION_NAME,
};
pub use flags::OneWayFlag;
pub use operators::OperatorRegistry;
pub use whitelist::Whitelist;
