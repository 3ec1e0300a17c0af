//! # Service Container
//!
//! Owns the ledger, governance and distribution services of one asset.
//!
//! ## Thread Safety
//!
//! - Every service is wrapped in `Arc` and synchronises internally
//! - The distributor reads the ledger and the governed price only through
//!   its adapters

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use fh_01_ownership_ledger::{LedgerEvent, LedgerResult, OwnershipLedger, OwnershipLedgerApi};
use fh_02_price_governance::{GovernanceEvent, PriceGovernance, PriceGovernanceApi};
use fh_03_yield_distribution::{
    DistributionEvent, InMemoryPaymentVault, PaymentVault, YieldDistributionApi,
};
use shared_types::{address_hex, Amount, TimeSource};

use crate::container::config::AssetConfig;
use crate::genesis::{FreeholdDistributor, GenesisBuilder, GenesisError};

/// Event drained from any subsystem.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "subsystem", content = "event", rename_all = "snake_case")]
pub enum FreeholdEvent {
    Ledger(LedgerEvent),
    Governance(GovernanceEvent),
    Distribution(DistributionEvent),
}

/// Point-in-time summary of the asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSnapshot {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: Amount,
    pub holder_count: usize,
    pub whitelisted: Vec<String>,
    pub current_price: Amount,
    pub recommendation_count: u64,
    pub pool_balance: Amount,
    pub custody_balance: Amount,
    pub registered_holders: Vec<String>,
    pub distribution_count: u64,
    pub total_distributed: Amount,
    pub valuation: Amount,
    pub annualized_yield_bps: u128,
    pub controllable: bool,
    pub issuable: bool,
}

/// Central container holding all subsystem instances.
pub struct FreeholdContainer {
    /// Ownership Ledger (Subsystem 1)
    pub ledger: Arc<OwnershipLedger>,

    /// Price Governance (Subsystem 2)
    pub governance: Arc<PriceGovernance>,

    /// Yield Distribution (Subsystem 3)
    /// Reads live balances from the ledger.
    pub distributor: Arc<FreeholdDistributor>,

    /// Custody of rental payments.
    pub vault: Arc<InMemoryPaymentVault>,

    /// Asset configuration (immutable after genesis).
    pub config: AssetConfig,
}

impl FreeholdContainer {
    /// Build all subsystems from `config` using the wall clock.
    pub fn new(config: AssetConfig) -> Result<Self, GenesisError> {
        Self::from_builder(GenesisBuilder::new(config.clone()), config)
    }

    /// Build all subsystems reading time from `time_source`.
    pub fn with_time_source(
        config: AssetConfig,
        time_source: Arc<dyn TimeSource>,
    ) -> Result<Self, GenesisError> {
        Self::from_builder(
            GenesisBuilder::new(config.clone()).with_time_source(time_source),
            config,
        )
    }

    fn from_builder(builder: GenesisBuilder, config: AssetConfig) -> Result<Self, GenesisError> {
        let genesis = builder.build()?;
        info!(
            symbol = %config.symbol,
            "Freehold container initialized"
        );
        Ok(Self {
            ledger: genesis.ledger,
            governance: genesis.governance,
            distributor: genesis.distributor,
            vault: genesis.vault,
            config,
        })
    }

    /// Drain pending events from every subsystem, ledger first.
    pub fn drain_events(&self) -> Vec<FreeholdEvent> {
        let ledger = self.ledger.take_events().into_iter().map(FreeholdEvent::Ledger);
        let governance = self
            .governance
            .take_events()
            .into_iter()
            .map(FreeholdEvent::Governance);
        let distribution = self
            .distributor
            .take_events()
            .into_iter()
            .map(FreeholdEvent::Distribution);
        ledger.chain(governance).chain(distribution).collect()
    }

    /// Recompute the ledger's conservation and partition invariants.
    pub fn verify_invariants(&self) -> LedgerResult<()> {
        self.ledger.verify_invariants()
    }

    pub fn snapshot(&self) -> AssetSnapshot {
        AssetSnapshot {
            name: self.ledger.name().to_string(),
            symbol: self.ledger.symbol().to_string(),
            decimals: self.ledger.decimals(),
            total_supply: self.ledger.total_supply(),
            holder_count: self.ledger.holder_count(),
            whitelisted: self
                .ledger
                .whitelisted_addresses()
                .iter()
                .map(address_hex)
                .collect(),
            current_price: self.governance.current_price(),
            recommendation_count: self.governance.recommendation_count(),
            pool_balance: self.distributor.pool_balance(),
            custody_balance: self.vault.custody_balance(),
            registered_holders: self
                .distributor
                .registered_holders()
                .iter()
                .map(address_hex)
                .collect(),
            distribution_count: self.distributor.distribution_count(),
            total_distributed: self.distributor.total_distributed(),
            valuation: self.distributor.valuation(),
            annualized_yield_bps: self.distributor.annualized_yield_bps(),
            controllable: self.ledger.is_controllable(),
            issuable: self.ledger.is_issuable(),
        }
    }
}
