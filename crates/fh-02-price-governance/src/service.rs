//! Price Governance Service
//!
//! Holds the append-only recommendation log and the single current price.
//! The current price changes only when a recommendation is accepted.

use crate::domain::{
    Decision, GovernanceConfig, PriceBounds, PriceRecommendation, RecommendationStatus,
};
use crate::error::{GovernanceError, GovernanceResult};
use crate::events::GovernanceEvent;
use crate::ports::PriceGovernanceApi;
use freehold_telemetry::log_event;
use freehold_telemetry::metrics::{
    amount_to_gauge, record_error, GOVERNANCE_CURRENT_PRICE, GOVERNANCE_RECOMMENDATIONS,
};
use parking_lot::RwLock;
use shared_types::{address_hex, is_zero_address, AccessControl, Address, Amount, Role, TimeSource};
use std::sync::Arc;

const SUBSYSTEM: &str = "price-governance";

struct GovernanceState {
    current_price: Amount,
    /// Index `i` holds recommendation id `i + 1`
    recommendations: Vec<PriceRecommendation>,
    access: AccessControl,
    pending_events: Vec<GovernanceEvent>,
}

impl GovernanceState {
    fn count(&self) -> u64 {
        self.recommendations.len() as u64
    }

    fn index_of(&self, id: u64) -> GovernanceResult<usize> {
        if id == 0 || id > self.count() {
            return Err(GovernanceError::InvalidRecommendationId {
                id,
                count: self.count(),
            });
        }
        Ok((id - 1) as usize)
    }

    fn with_status(&self, status: RecommendationStatus) -> Vec<PriceRecommendation> {
        self.recommendations
            .iter()
            .filter(|r| r.status == status)
            .cloned()
            .collect()
    }
}

/// Price Governance Service
pub struct PriceGovernance {
    config: GovernanceConfig,
    state: RwLock<GovernanceState>,
    time_source: Arc<dyn TimeSource>,
}

impl PriceGovernance {
    /// `admin` receives `Admin` and `Manager`.
    pub fn new(
        config: GovernanceConfig,
        admin: Address,
        initial_price: Amount,
        time_source: Arc<dyn TimeSource>,
    ) -> GovernanceResult<Self> {
        if initial_price == 0 {
            return Err(GovernanceError::InvalidPrice);
        }
        if is_zero_address(&admin) {
            return Err(shared_types::AccessError::ZeroAddress { role: Role::Admin }.into());
        }

        GOVERNANCE_CURRENT_PRICE.set(amount_to_gauge(initial_price));
        log_event!(
            info,
            SUBSYSTEM,
            "Price governance created",
            admin = %address_hex(&admin),
            initial_price = initial_price,
            max_deviation_bps = config.max_deviation_bps
        );

        Ok(Self {
            config,
            state: RwLock::new(GovernanceState {
                current_price: initial_price,
                recommendations: Vec::new(),
                access: AccessControl::with_roles(admin, &[Role::Admin, Role::Manager]),
                pending_events: Vec::new(),
            }),
            time_source,
        })
    }

    pub fn config(&self) -> &GovernanceConfig {
        &self.config
    }

    /// Drain pending events.
    pub fn take_events(&self) -> Vec<GovernanceEvent> {
        std::mem::take(&mut self.state.write().pending_events)
    }

    fn rejected_call(
        &self,
        operation: &'static str,
        caller: &Address,
        err: GovernanceError,
    ) -> GovernanceError {
        record_error(SUBSYSTEM, err.kind());
        log_event!(
            warn,
            SUBSYSTEM,
            "Governance operation rejected",
            operation = operation,
            caller = %address_hex(caller),
            error = %err
        );
        err
    }

    /// Field checks in a fixed order; the bound check comes last.
    fn validate_submission(
        &self,
        current_price: Amount,
        price: Amount,
        confidence: u8,
        justification: &str,
    ) -> GovernanceResult<()> {
        if price == 0 {
            return Err(GovernanceError::InvalidPrice);
        }
        if confidence > self.config.max_confidence {
            return Err(GovernanceError::InvalidConfidenceScore {
                score: confidence,
                max: self.config.max_confidence,
            });
        }
        if justification.is_empty() {
            return Err(GovernanceError::EmptyJustification);
        }
        let length = justification.chars().count();
        if length > self.config.max_justification_len {
            return Err(GovernanceError::JustificationTooLong {
                length,
                max: self.config.max_justification_len,
            });
        }
        let bounds = PriceBounds::around(current_price, self.config.max_deviation_bps);
        if !bounds.contains(price) {
            return Err(GovernanceError::PriceOutOfBounds {
                price,
                min: bounds.min,
                max: bounds.max,
            });
        }
        Ok(())
    }

    fn decide(&self, caller: Address, id: u64, decision: Decision) -> GovernanceResult<()> {
        let operation = match decision {
            Decision::Accept => "accept_recommendation",
            Decision::Reject => "reject_recommendation",
        };
        let now = self.time_source.now();
        let mut state = self.state.write();

        let index = state
            .access
            .require(Role::Manager, &caller)
            .map_err(GovernanceError::from)
            .and_then(|_| state.index_of(id))
            .map_err(|e| self.rejected_call(operation, &caller, e))?;

        let record = &mut state.recommendations[index];
        let price = record.price;
        record
            .decide(decision, caller, now)
            .map_err(|status| GovernanceError::AlreadyProcessed { id, status })
            .map_err(|e| self.rejected_call(operation, &caller, e))?;

        match decision {
            Decision::Accept => {
                let previous = std::mem::replace(&mut state.current_price, price);
                state.pending_events.push(GovernanceEvent::RecommendationAccepted {
                    id,
                    price,
                    by: caller,
                });
                state.pending_events.push(GovernanceEvent::PriceUpdated {
                    previous,
                    current: price,
                    recommendation_id: id,
                });
                GOVERNANCE_RECOMMENDATIONS
                    .with_label_values(&["accepted"])
                    .inc();
                GOVERNANCE_CURRENT_PRICE.set(amount_to_gauge(price));
                log_event!(
                    info,
                    SUBSYSTEM,
                    "Recommendation accepted, current price updated",
                    id = id,
                    previous = previous,
                    current = price
                );
            }
            Decision::Reject => {
                state.pending_events.push(GovernanceEvent::RecommendationRejected {
                    id,
                    price,
                    by: caller,
                });
                GOVERNANCE_RECOMMENDATIONS
                    .with_label_values(&["rejected"])
                    .inc();
                log_event!(info, SUBSYSTEM, "Recommendation rejected", id = id, price = price);
            }
        }
        Ok(())
    }
}

impl PriceGovernanceApi for PriceGovernance {
    fn submit_recommendation(
        &self,
        caller: Address,
        price: Amount,
        confidence: u8,
        justification: &str,
    ) -> GovernanceResult<u64> {
        let now = self.time_source.now();
        let mut state = self.state.write();

        state
            .access
            .require(Role::RecommendationSubmitter, &caller)
            .map_err(GovernanceError::from)
            .and_then(|_| {
                self.validate_submission(state.current_price, price, confidence, justification)
            })
            .map_err(|e| {
                if matches!(e, GovernanceError::PriceOutOfBounds { .. }) {
                    GOVERNANCE_RECOMMENDATIONS
                        .with_label_values(&["out_of_bounds"])
                        .inc();
                }
                self.rejected_call("submit_recommendation", &caller, e)
            })?;

        let id = state.count() + 1;
        state.recommendations.push(PriceRecommendation::new(
            id,
            price,
            confidence,
            justification.to_string(),
            caller,
            now,
        ));
        state.pending_events.push(GovernanceEvent::RecommendationSubmitted {
            id,
            price,
            confidence,
            submitter: caller,
        });
        GOVERNANCE_RECOMMENDATIONS
            .with_label_values(&["submitted"])
            .inc();
        log_event!(
            info,
            SUBSYSTEM,
            "Recommendation submitted",
            id = id,
            price = price,
            confidence = confidence,
            submitter = %address_hex(&caller)
        );
        Ok(id)
    }

    fn accept_recommendation(&self, caller: Address, id: u64) -> GovernanceResult<()> {
        self.decide(caller, id, Decision::Accept)
    }

    fn reject_recommendation(&self, caller: Address, id: u64) -> GovernanceResult<()> {
        self.decide(caller, id, Decision::Reject)
    }

    fn grant_role(&self, caller: Address, role: Role, account: Address) -> GovernanceResult<()> {
        let mut state = self.state.write();
        let granted = state
            .access
            .grant(&caller, role, account)
            .map_err(|e| self.rejected_call("grant_role", &caller, e.into()))?;
        if granted {
            state.pending_events.push(GovernanceEvent::RoleGranted {
                role,
                account,
                by: caller,
            });
            log_event!(info, SUBSYSTEM, "Role granted", role = %role, account = %address_hex(&account));
        }
        Ok(())
    }

    fn revoke_role(&self, caller: Address, role: Role, account: Address) -> GovernanceResult<()> {
        let mut state = self.state.write();
        let revoked = state
            .access
            .revoke(&caller, role, &account)
            .map_err(|e| self.rejected_call("revoke_role", &caller, e.into()))?;
        if revoked {
            state.pending_events.push(GovernanceEvent::RoleRevoked {
                role,
                account,
                by: caller,
            });
            log_event!(info, SUBSYSTEM, "Role revoked", role = %role, account = %address_hex(&account));
        }
        Ok(())
    }

    fn current_price(&self) -> Amount {
        self.state.read().current_price
    }

    fn price_bounds(&self) -> PriceBounds {
        PriceBounds::around(self.state.read().current_price, self.config.max_deviation_bps)
    }

    fn recommendation(&self, id: u64) -> GovernanceResult<PriceRecommendation> {
        let state = self.state.read();
        let index = state.index_of(id)?;
        Ok(state.recommendations[index].clone())
    }

    fn recommendation_count(&self) -> u64 {
        self.state.read().count()
    }

    fn history(&self) -> Vec<PriceRecommendation> {
        self.state.read().recommendations.clone()
    }

    fn latest(&self) -> Option<PriceRecommendation> {
        self.state.read().recommendations.last().cloned()
    }

    fn pending(&self) -> Vec<PriceRecommendation> {
        self.state.read().with_status(RecommendationStatus::Pending)
    }

    fn accepted(&self) -> Vec<PriceRecommendation> {
        self.state.read().with_status(RecommendationStatus::Accepted)
    }

    fn rejected(&self) -> Vec<PriceRecommendation> {
        self.state.read().with_status(RecommendationStatus::Rejected)
    }

    fn recent(&self, n: usize) -> Vec<PriceRecommendation> {
        let n = n.min(self.config.max_page_size);
        self.state
            .read()
            .recommendations
            .iter()
            .rev()
            .take(n)
            .cloned()
            .collect()
    }

    fn page(&self, offset: usize, limit: usize) -> Vec<PriceRecommendation> {
        let limit = limit.min(self.config.max_page_size);
        self.state
            .read()
            .recommendations
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect()
    }

    fn has_role(&self, role: Role, account: &Address) -> bool {
        self.state.read().access.has_role(role, account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{AccessError, ManualTimeSource};

    const ADMIN: Address = [0xAA; 20];
    const ANALYST: Address = [0x0A; 20];
    const OUTSIDER: Address = [0x0F; 20];

    fn create_governance(initial_price: Amount) -> (PriceGovernance, Arc<ManualTimeSource>) {
        create_with_config(GovernanceConfig::default(), initial_price)
    }

    fn create_with_config(
        config: GovernanceConfig,
        initial_price: Amount,
    ) -> (PriceGovernance, Arc<ManualTimeSource>) {
        let clock = Arc::new(ManualTimeSource::new(1_700_000_000));
        let governance = PriceGovernance::new(config, ADMIN, initial_price, clock.clone()).unwrap();
        governance
            .grant_role(ADMIN, Role::RecommendationSubmitter, ANALYST)
            .unwrap();
        (governance, clock)
    }

    fn submit(governance: &PriceGovernance, price: Amount) -> u64 {
        governance
            .submit_recommendation(ANALYST, price, 80, "comparable sales")
            .unwrap()
    }

    #[test]
    fn test_zero_initial_price_rejected() {
        let clock = Arc::new(ManualTimeSource::new(0));
        let result = PriceGovernance::new(GovernanceConfig::default(), ADMIN, 0, clock);
        assert!(matches!(result, Err(GovernanceError::InvalidPrice)));
    }

    #[test]
    fn test_submit_and_accept_updates_price() {
        let (governance, clock) = create_governance(2_000);
        let id = governance
            .submit_recommendation(ANALYST, 2_100, 85, "rental comps up 5%")
            .unwrap();
        assert_eq!(id, 1);
        assert_eq!(governance.pending().len(), 1);

        clock.advance(3_600);
        governance.accept_recommendation(ADMIN, id).unwrap();

        assert_eq!(governance.current_price(), 2_100);
        let record = governance.recommendation(id).unwrap();
        assert_eq!(record.status, RecommendationStatus::Accepted);
        assert_eq!(record.created_at, 1_700_000_000);
        assert_eq!(record.processed_at, Some(1_700_003_600));
        assert_eq!(record.processed_by, Some(ADMIN));

        let events = governance.take_events();
        assert!(events.contains(&GovernanceEvent::PriceUpdated {
            previous: 2_000,
            current: 2_100,
            recommendation_id: 1
        }));
    }

    #[test]
    fn test_reject_keeps_price() {
        let (governance, _) = create_governance(2_000);
        let id = submit(&governance, 1_500);
        governance.reject_recommendation(ADMIN, id).unwrap();
        assert_eq!(governance.current_price(), 2_000);
        assert_eq!(governance.rejected().len(), 1);
        assert!(governance.pending().is_empty());
    }

    #[test]
    fn test_terminal_state_immutability() {
        let (governance, _) = create_governance(2_000);
        let id = submit(&governance, 2_100);
        governance.accept_recommendation(ADMIN, id).unwrap();

        assert_eq!(
            governance.reject_recommendation(ADMIN, id),
            Err(GovernanceError::AlreadyProcessed { id, status: RecommendationStatus::Accepted })
        );
        assert_eq!(
            governance.accept_recommendation(ADMIN, id),
            Err(GovernanceError::AlreadyProcessed { id, status: RecommendationStatus::Accepted })
        );
        assert_eq!(governance.current_price(), 2_100);
    }

    #[test]
    fn test_invalid_recommendation_ids() {
        let (governance, _) = create_governance(2_000);
        submit(&governance, 2_000);
        assert_eq!(
            governance.accept_recommendation(ADMIN, 0),
            Err(GovernanceError::InvalidRecommendationId { id: 0, count: 1 })
        );
        assert_eq!(
            governance.accept_recommendation(ADMIN, 2),
            Err(GovernanceError::InvalidRecommendationId { id: 2, count: 1 })
        );
        assert!(governance.recommendation(5).is_err());
    }

    #[test]
    fn test_validation_order() {
        let (governance, _) = create_governance(2_000);
        let long = "x".repeat(513);

        // Every field invalid: price reported first
        assert_eq!(
            governance.submit_recommendation(ANALYST, 0, 101, ""),
            Err(GovernanceError::InvalidPrice)
        );
        assert_eq!(
            governance.submit_recommendation(ANALYST, 1_000_000, 101, ""),
            Err(GovernanceError::InvalidConfidenceScore { score: 101, max: 100 })
        );
        assert_eq!(
            governance.submit_recommendation(ANALYST, 1_000_000, 100, ""),
            Err(GovernanceError::EmptyJustification)
        );
        assert_eq!(
            governance.submit_recommendation(ANALYST, 1_000_000, 100, &long),
            Err(GovernanceError::JustificationTooLong { length: 513, max: 512 })
        );
        assert_eq!(
            governance.submit_recommendation(ANALYST, 1_000_000, 100, "ok"),
            Err(GovernanceError::PriceOutOfBounds { price: 1_000_000, min: 1_000, max: 3_000 })
        );
        assert_eq!(governance.recommendation_count(), 0);
    }

    #[test]
    fn test_justification_length_counts_characters() {
        let (governance, _) = create_governance(2_000);
        // 512 two-byte characters is 1024 bytes but within the limit
        let text = "é".repeat(512);
        assert!(governance.submit_recommendation(ANALYST, 2_000, 50, &text).is_ok());
    }

    #[test]
    fn test_bound_edges_inclusive() {
        let (governance, _) = create_governance(2_000);
        assert!(governance.submit_recommendation(ANALYST, 1_000, 50, "floor").is_ok());
        assert!(governance.submit_recommendation(ANALYST, 3_000, 50, "ceiling").is_ok());
        assert!(governance.submit_recommendation(ANALYST, 999, 50, "below").is_err());
        assert!(governance.submit_recommendation(ANALYST, 3_001, 50, "above").is_err());
    }

    #[test]
    fn test_bound_follows_current_price() {
        let (governance, _) = create_governance(2_000);
        let id = submit(&governance, 3_000);
        governance.accept_recommendation(ADMIN, id).unwrap();
        assert_eq!(governance.price_bounds(), PriceBounds { min: 1_500, max: 4_500 });
        assert!(governance.submit_recommendation(ANALYST, 4_500, 50, "ok").is_ok());
    }

    #[test]
    fn test_role_gating() {
        let (governance, _) = create_governance(2_000);
        assert_eq!(
            governance.submit_recommendation(OUTSIDER, 2_000, 50, "x"),
            Err(GovernanceError::Unauthorized(AccessError::MissingRole {
                role: Role::RecommendationSubmitter,
                account: OUTSIDER
            }))
        );
        let id = submit(&governance, 2_000);
        assert!(matches!(
            governance.accept_recommendation(ANALYST, id),
            Err(GovernanceError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_pagination() {
        let config = GovernanceConfig {
            max_page_size: 3,
            ..GovernanceConfig::default()
        };
        let (governance, _) = create_with_config(config, 2_000);
        for price in 1_901..=1_905 {
            submit(&governance, price);
        }

        let recent: Vec<u64> = governance.recent(10).iter().map(|r| r.id).collect();
        assert_eq!(recent, vec![5, 4, 3]);

        let page: Vec<u64> = governance.page(1, 2).iter().map(|r| r.id).collect();
        assert_eq!(page, vec![2, 3]);

        let capped: Vec<u64> = governance.page(0, 100).iter().map(|r| r.id).collect();
        assert_eq!(capped, vec![1, 2, 3]);

        assert!(governance.page(10, 2).is_empty());
        assert_eq!(governance.latest().map(|r| r.id), Some(5));
        assert_eq!(governance.history().len(), 5);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        /// Band computed without the 256-bit helper; exact while
        /// `current < 2^64` and `bps <= 20_000`.
        fn expected_band(current: Amount, bps: u128) -> (Amount, Amount) {
            let min = current * (10_000 - bps.min(10_000)) / 10_000;
            let max = current * (10_000 + bps) / 10_000;
            (min, max)
        }

        fn governance_with(current: Amount, bps: u128) -> PriceGovernance {
            let config = GovernanceConfig {
                max_deviation_bps: bps,
                ..GovernanceConfig::default()
            };
            create_with_config(config, current).0
        }

        fn assert_bound_outcome(
            governance: &PriceGovernance,
            candidate: Amount,
            (min, max): (Amount, Amount),
        ) -> Result<(), TestCaseError> {
            let result = governance.submit_recommendation(ANALYST, candidate, 50, "appraisal");
            if min <= candidate && candidate <= max {
                prop_assert!(result.is_ok());
                prop_assert_eq!(governance.recommendation_count(), 1);
            } else {
                prop_assert_eq!(
                    result,
                    Err(GovernanceError::PriceOutOfBounds { price: candidate, min, max })
                );
                prop_assert_eq!(governance.recommendation_count(), 0);
            }
            Ok(())
        }

        proptest! {
            #[test]
            fn prop_bound_decides_submission(
                current in 1u128..u64::MAX as u128,
                bps in 0u128..=20_000,
                candidate in 1u128..u64::MAX as u128,
            ) {
                let governance = governance_with(current, bps);
                assert_bound_outcome(&governance, candidate, expected_band(current, bps))?;
            }

            #[test]
            fn prop_bound_edges(
                current in 1u128..u64::MAX as u128,
                bps in 0u128..=20_000,
                at_max in any::<bool>(),
                offset in -2i64..=2,
            ) {
                let band = expected_band(current, bps);
                let edge = if at_max { band.1 } else { band.0 };
                let candidate = if offset < 0 {
                    edge.saturating_sub(offset.unsigned_abs() as u128)
                } else {
                    edge + offset as u128
                };
                prop_assume!(candidate > 0);

                let governance = governance_with(current, bps);
                assert_bound_outcome(&governance, candidate, band)?;
            }
        }
    }
}
