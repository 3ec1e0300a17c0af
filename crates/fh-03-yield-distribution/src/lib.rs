//! # fh-03-yield-distribution
//!
//! Rental income pool and pro-rata payouts to registered holders.
//!
//! ## Overview
//!
//! - **Pool**: payments from `PaymentSubmitter` accounts accumulate until a
//!   manager distributes them
//! - **Live shares**: each registered holder receives
//!   `floor(pool × balance / total_supply)` using ledger balances read at
//!   distribution time; rounding dust stays in custody
//! - **Reentrancy**: one mutating operation at a time, nested calls fail
//! - **All or nothing**: a failed disbursement reverts the whole distribution
//!
//! ## Architecture
//!
//! ```text
//!                    ┌────────────────────────────┐
//! PaymentSubmitter ─→│     YieldDistributor       │──balance_of──→ BalanceProvider (ledger)
//! Manager ──────────→│  pool · holders · records  │──current_price→ PriceFeed (governance)
//!                    └─────────────┬──────────────┘
//!                                  │ collect / disburse_batch
//!                                  ▼
//!                             PaymentVault
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use fh_03_yield_distribution::{
//!     DistributionConfig, InMemoryPaymentVault, YieldDistributionApi, YieldDistributor,
//! };
//!
//! let distributor = YieldDistributor::new(config, admin, ledger_view, vault, clock)?;
//! distributor.grant_role(admin, Role::PaymentSubmitter, tenant)?;
//! distributor.register_holders(admin, &[alice, bob])?;
//! distributor.receive_rental_payment(tenant, 2_000)?;
//! let record = distributor.distribute_yields(admin)?;
//! assert_eq!(record.id, 1);
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod events;
pub mod ports;
pub mod service;

pub use adapters::InMemoryPaymentVault;
pub use domain::{DistributionConfig, DistributionRecord, Payout, PayoutPlan};
pub use error::{DistributionError, DistributionResult, VaultError};
pub use events::DistributionEvent;
pub use ports::{BalanceProvider, PaymentVault, PriceFeed, YieldDistributionApi};
pub use service::YieldDistributor;
