//! # fh-01-ownership-ledger
//!
//! Partitioned ownership ledger for a single fractionalised asset.
//!
//! ## Overview
//!
//! This subsystem provides:
//! - **Partitioned balances**: `holder -> partition -> amount` with a cached
//!   aggregate and a partition registry that fixes draw-down order
//! - **Transfer restriction**: receivers must be whitelisted unless a
//!   controller forces the move
//! - **Operators**: global or per-partition authorizations
//! - **One-way flags**: issuance and controller powers can be renounced, never restored
//!
//! ## Architecture
//!
//! ```text
//! Manager ──whitelist──→ Ownership Ledger (1) ←──balance_of / total_supply── Distribution (3)
//! Issuer  ──issue──────→        │
//! Holder  ──transfer───→        └── LedgerEvent (take_events)
//! ```
//!
//! ## Invariants
//!
//! | Invariant | Check |
//! |-----------|-------|
//! | Conservation | Σ aggregate balances == total supply |
//! | Partition consistency | Σ partition amounts == aggregate, per holder |
//! | Transfer restriction | ordinary receivers are whitelisted |
//!
//! [`OwnershipLedger::verify_invariants`] recomputes all of them.
//!
//! ## Example
//!
//! ```rust,ignore
//! use fh_01_ownership_ledger::{LedgerConfig, OwnershipLedger, OwnershipLedgerApi};
//!
//! let ledger = OwnershipLedger::new(LedgerConfig::default(), admin, alice, 1_000)?;
//! ledger.add_to_whitelist(admin, bob)?;
//! ledger.transfer(alice, bob, 250, None)?;
//! assert_eq!(ledger.ownership_percentage(&bob), 2_500);
//! ```

pub mod domain;
pub mod error;
pub mod events;
pub mod ports;
pub mod service;

pub use domain::{
    BalanceEntry, LedgerConfig, Partition, PartitionLeg, TransferPath, TransferReceipt,
    TransferStatus, DEFAULT_PARTITION_NAME,
};
pub use error::{LedgerError, LedgerResult};
pub use events::LedgerEvent;
pub use ports::OwnershipLedgerApi;
pub use service::OwnershipLedger;
