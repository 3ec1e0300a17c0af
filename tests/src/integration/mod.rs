//! # Integration Tests
//!
//! Every test builds a complete asset through [`freehold_runtime`] with a
//! manual clock, so balances, prices and timestamps are deterministic.

pub mod flows;
pub mod properties;
pub mod scenarios;

use freehold_runtime::{AssetConfig, FreeholdContainer};
use shared_types::{Address, Amount, ManualTimeSource, Role};
use std::sync::Arc;

pub const ADMIN: Address = [0xAD; 20];
pub const ISSUER_HOLDER: Address = [0x01; 20];
pub const TENANT: Address = [0x7E; 20];
pub const ANALYST: Address = [0xA1; 20];
pub const GENESIS_TIME: u64 = 1_700_000_000;

/// Asset fixture with a manual clock.
pub struct TestAsset {
    pub container: FreeholdContainer,
    pub clock: Arc<ManualTimeSource>,
}

impl TestAsset {
    pub fn new(initial_supply: Amount) -> Self {
        Self::with_config(AssetConfig {
            admin: ADMIN,
            initial_holder: ISSUER_HOLDER,
            initial_supply,
            ..AssetConfig::devnet()
        })
    }

    pub fn with_config(config: AssetConfig) -> Self {
        let clock = Arc::new(ManualTimeSource::new(GENESIS_TIME));
        let container = FreeholdContainer::with_time_source(config, clock.clone())
            .expect("genesis should succeed");
        Self { container, clock }
    }

    /// Whitelist `to` and move `amount` from the initial holder.
    pub fn allocate(&self, to: Address, amount: Amount) {
        use fh_01_ownership_ledger::OwnershipLedgerApi;
        let ledger = &self.container.ledger;
        ledger.add_to_whitelist(ADMIN, to).expect("whitelist");
        ledger
            .transfer(ISSUER_HOLDER, to, amount, None)
            .expect("allocation transfer");
    }

    /// Fund the tenant and grant it the payment role.
    pub fn with_tenant(self, funds: Amount) -> Self {
        use fh_03_yield_distribution::YieldDistributionApi;
        self.container.vault.fund(TENANT, funds);
        self.container
            .distributor
            .grant_role(ADMIN, Role::PaymentSubmitter, TENANT)
            .expect("grant payment role");
        self
    }
}
