//! # Freehold Runtime Library
//!
//! Boots one fractionalised asset and exposes its services.
//!
//! ## Modules
//!
//! - `container/` - Asset configuration and the service container
//! - `genesis/` - Builds the three subsystems for a new asset
//! - `adapters/` - Outbound port implementations joining the subsystems
//!
//! ## Startup Sequence
//!
//! 1. Load [`AssetConfig`] from the environment
//! 2. Validate it
//! 3. Build ledger, governance and distribution (genesis)
//! 4. Wire the distributor to the ledger and, optionally, the governed price

pub mod adapters;
pub mod container;
pub mod genesis;

pub use adapters::{GovernancePriceAdapter, LedgerBalanceAdapter};
pub use container::{AssetConfig, AssetSnapshot, ConfigError, FreeholdContainer, FreeholdEvent};
pub use genesis::{FreeholdDistributor, Genesis, GenesisBuilder, GenesisError};
