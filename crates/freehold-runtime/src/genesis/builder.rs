//! # Genesis Builder
//!
//! Creates the ledger, governance and distribution services from an
//! [`AssetConfig`] and joins them through the runtime adapters.
//!
//! ## Genesis State
//!
//! - `admin` holds every administrative role in all three subsystems
//! - `initial_holder` owns the whole initial supply in the default partition,
//!   is whitelisted and, with a nonzero supply, registered for distributions
//! - the governed price starts at `initial_price`

use crate::adapters::{GovernancePriceAdapter, LedgerBalanceAdapter};
use crate::container::config::{AssetConfig, ConfigError};
use fh_01_ownership_ledger::{LedgerError, OwnershipLedger};
use fh_02_price_governance::{GovernanceError, PriceGovernance};
use fh_03_yield_distribution::{
    DistributionError, InMemoryPaymentVault, YieldDistributionApi, YieldDistributor,
};
use shared_types::{address_hex, SystemTimeSource, TimeSource};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Distributor wired to the live ledger and the in-memory vault.
pub type FreeholdDistributor = YieldDistributor<LedgerBalanceAdapter, InMemoryPaymentVault>;

/// Genesis creation errors.
#[derive(Debug, Error)]
pub enum GenesisError {
    /// Invalid asset configuration.
    #[error("Invalid asset configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to initialize ledger: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Failed to initialize price governance: {0}")]
    Governance(#[from] GovernanceError),

    #[error("Failed to initialize distribution: {0}")]
    Distribution(#[from] DistributionError),
}

/// The services of a freshly created asset.
pub struct Genesis {
    pub ledger: Arc<OwnershipLedger>,
    pub governance: Arc<PriceGovernance>,
    pub distributor: Arc<FreeholdDistributor>,
    pub vault: Arc<InMemoryPaymentVault>,
}

/// Builder for genesis services.
pub struct GenesisBuilder {
    config: AssetConfig,
    time_source: Arc<dyn TimeSource>,
}

impl GenesisBuilder {
    pub fn new(config: AssetConfig) -> Self {
        Self {
            config,
            time_source: Arc::new(SystemTimeSource),
        }
    }

    /// Use `time_source` for every subsystem instead of the wall clock.
    pub fn with_time_source(mut self, time_source: Arc<dyn TimeSource>) -> Self {
        self.time_source = time_source;
        self
    }

    /// Validate the configuration and build the services.
    pub fn build(self) -> Result<Genesis, GenesisError> {
        let config = &self.config;
        config.validate()?;

        let ledger = Arc::new(OwnershipLedger::new(
            config.ledger_config(),
            config.admin,
            config.initial_holder,
            config.initial_supply,
        )?);

        let governance = Arc::new(PriceGovernance::new(
            config.governance_config(),
            config.admin,
            config.initial_price,
            self.time_source.clone(),
        )?);

        let vault = Arc::new(InMemoryPaymentVault::new());
        let mut distributor = YieldDistributor::new(
            config.distribution_config(),
            config.admin,
            Arc::new(LedgerBalanceAdapter::new(ledger.clone())),
            vault.clone(),
            self.time_source.clone(),
        )?;
        if config.enforce_price_floor {
            distributor =
                distributor.with_price_feed(Arc::new(GovernancePriceAdapter::new(governance.clone())));
        }
        if config.initial_supply > 0 {
            distributor.register_holder(config.admin, config.initial_holder)?;
        }

        info!(
            symbol = %config.symbol,
            admin = %address_hex(&config.admin),
            initial_holder = %address_hex(&config.initial_holder),
            initial_supply = config.initial_supply,
            initial_price = config.initial_price,
            price_floor = config.enforce_price_floor,
            "Genesis complete"
        );

        Ok(Genesis {
            ledger,
            governance,
            distributor: Arc::new(distributor),
            vault,
        })
    }
}
