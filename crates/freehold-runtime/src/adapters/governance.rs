//! # Governance Price Adapter
//!
//! Supplies the governed current price as the minimum accepted rental payment.

use fh_02_price_governance::{PriceGovernance, PriceGovernanceApi};
use fh_03_yield_distribution::PriceFeed;
use shared_types::Amount;
use std::sync::Arc;

#[derive(Clone)]
pub struct GovernancePriceAdapter {
    governance: Arc<PriceGovernance>,
}

impl GovernancePriceAdapter {
    pub fn new(governance: Arc<PriceGovernance>) -> Self {
        Self { governance }
    }
}

impl PriceFeed for GovernancePriceAdapter {
    fn current_price(&self) -> Amount {
        self.governance.current_price()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fh_02_price_governance::GovernanceConfig;
    use shared_types::{Address, ManualTimeSource, Role};

    const ADMIN: Address = [0xAD; 20];
    const ANALYST: Address = [0x0A; 20];

    #[test]
    fn test_price_tracks_accepted_recommendation() {
        let governance = Arc::new(
            PriceGovernance::new(
                GovernanceConfig::default(),
                ADMIN,
                2_000,
                Arc::new(ManualTimeSource::new(0)),
            )
            .unwrap(),
        );
        let feed = GovernancePriceAdapter::new(governance.clone());
        assert_eq!(feed.current_price(), 2_000);

        governance
            .grant_role(ADMIN, Role::RecommendationSubmitter, ANALYST)
            .unwrap();
        let id = governance
            .submit_recommendation(ANALYST, 2_400, 90, "new lease signed")
            .unwrap();
        assert_eq!(feed.current_price(), 2_000);

        governance.accept_recommendation(ADMIN, id).unwrap();
        assert_eq!(feed.current_price(), 2_400);
    }
}
