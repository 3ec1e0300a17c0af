//! # Adapter Implementations
//!
//! Concrete implementations of the distribution engine's outbound ports,
//! backed by the other subsystems.
//!
//! ```text
//! YieldDistributor ──BalanceProvider──→ LedgerBalanceAdapter ──→ OwnershipLedger
//!                  ──PriceFeed────────→ GovernancePriceAdapter ─→ PriceGovernance
//! ```
//!
//! Both adapters are read-only views. The distributor never mutates the
//! ledger or the governed price through them.

pub mod governance;
pub mod ledger;

pub use governance::GovernancePriceAdapter;
pub use ledger::LedgerBalanceAdapter;
