//! # Acceptance Scenarios
//!
//! The five reference scenarios, each run against a fully wired asset.

#[cfg(test)]
mod tests {
    use super::super::*;
    use fh_01_ownership_ledger::OwnershipLedgerApi;
    use fh_02_price_governance::{
        GovernanceError, PriceGovernanceApi, RecommendationStatus,
    };
    use fh_03_yield_distribution::{DistributionError, YieldDistributionApi};
    use shared_types::Role;

    const HOLDER: Address = [0x0B; 20];
    const HOLDER_B: Address = [0x0C; 20];
    const NEWCOMER: Address = [0x0D; 20];

    // =========================================================================
    // SCENARIO A: OWNERSHIP PERCENTAGE
    // =========================================================================

    #[test]
    fn scenario_a_half_of_supply_is_5000_bps() {
        let asset = TestAsset::new(100);
        asset.allocate(HOLDER, 50);

        let ledger = &asset.container.ledger;
        assert_eq!(ledger.ownership_percentage(&HOLDER), 5_000);
        assert_eq!(ledger.ownership_percentage(&ISSUER_HOLDER), 5_000);
        assert_eq!(ledger.total_supply(), 100);
        assert!(asset.container.verify_invariants().is_ok());
    }

    // =========================================================================
    // SCENARIO B: ACCEPTED RECOMMENDATION MOVES THE PRICE
    // =========================================================================

    #[test]
    fn scenario_b_accept_updates_current_price() {
        let asset = TestAsset::new(100);
        let governance = &asset.container.governance;
        governance
            .grant_role(ADMIN, Role::RecommendationSubmitter, ANALYST)
            .unwrap();

        let id = governance
            .submit_recommendation(ANALYST, 2_100, 85, "comparable sales up 5%")
            .unwrap();
        assert_eq!(governance.current_price(), 2_000);

        governance.accept_recommendation(ADMIN, id).unwrap();
        assert_eq!(governance.current_price(), 2_100);

        let rec = governance.recommendation(id).unwrap();
        assert_eq!(rec.status, RecommendationStatus::Accepted);
        assert_eq!(rec.confidence, 85);
        assert_eq!(rec.processed_by, Some(ADMIN));
    }

    // =========================================================================
    // SCENARIO C: PROPORTIONAL DISTRIBUTION
    // =========================================================================

    #[test]
    fn scenario_c_payouts_follow_50_30_20() {
        let asset = TestAsset::new(100).with_tenant(10_000);
        asset.allocate(HOLDER, 30);
        asset.allocate(HOLDER_B, 20);

        let distributor = &asset.container.distributor;
        distributor.register_holders(ADMIN, &[HOLDER, HOLDER_B]).unwrap();
        distributor.receive_rental_payment(TENANT, 2_000).unwrap();

        let record = distributor.distribute_yields(ADMIN).unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(record.recipient_count, 3);
        assert_eq!(record.total_amount, 2_000);
        assert_eq!(distributor.pool_balance(), 0);

        let vault = &asset.container.vault;
        assert_eq!(vault.wallet_balance(&ISSUER_HOLDER), 1_000);
        assert_eq!(vault.wallet_balance(&HOLDER), 600);
        assert_eq!(vault.wallet_balance(&HOLDER_B), 400);
        assert_eq!(vault.wallet_balance(&TENANT), 8_000);
    }

    // =========================================================================
    // SCENARIO D: OUT-OF-BOUNDS RECOMMENDATION
    // =========================================================================

    #[test]
    fn scenario_d_far_price_rejected() {
        let asset = TestAsset::new(100);
        let governance = &asset.container.governance;
        governance
            .grant_role(ADMIN, Role::RecommendationSubmitter, ANALYST)
            .unwrap();

        let result = governance.submit_recommendation(ANALYST, 1_000_000, 50, "outlier");
        assert_eq!(
            result,
            Err(GovernanceError::PriceOutOfBounds {
                price: 1_000_000,
                min: 1_000,
                max: 3_000
            })
        );
        assert_eq!(governance.recommendation_count(), 0);
        assert_eq!(governance.current_price(), 2_000);
    }

    // =========================================================================
    // SCENARIO E: SELF-REGISTRATION WITHOUT UNITS
    // =========================================================================

    #[test]
    fn scenario_e_self_registration_needs_balance() {
        let asset = TestAsset::new(100);
        let distributor = &asset.container.distributor;

        assert_eq!(
            distributor.register_holder_for_self(NEWCOMER),
            Err(DistributionError::NoTokenBalance { holder: NEWCOMER })
        );
        assert!(!distributor.is_registered(&NEWCOMER));

        asset.allocate(NEWCOMER, 1);
        distributor.register_holder_for_self(NEWCOMER).unwrap();
        assert!(distributor.is_registered(&NEWCOMER));
    }
}
