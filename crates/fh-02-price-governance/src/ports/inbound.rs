//! Driving Ports (API - Inbound)

use crate::domain::{PriceBounds, PriceRecommendation};
use crate::error::GovernanceResult;
use shared_types::{Address, Amount, Role};

/// Primary Price Governance API
///
/// Recommendations arrive from an external analysis pipeline through
/// `submit_recommendation`; managers settle them with accept/reject.
pub trait PriceGovernanceApi: Send + Sync {
    /// Append a new pending recommendation. Returns its id.
    fn submit_recommendation(
        &self,
        caller: Address,
        price: Amount,
        confidence: u8,
        justification: &str,
    ) -> GovernanceResult<u64>;

    /// Accept a pending recommendation and adopt its price.
    fn accept_recommendation(&self, caller: Address, id: u64) -> GovernanceResult<()>;

    /// Reject a pending recommendation.
    fn reject_recommendation(&self, caller: Address, id: u64) -> GovernanceResult<()>;

    fn grant_role(&self, caller: Address, role: Role, account: Address) -> GovernanceResult<()>;
    fn revoke_role(&self, caller: Address, role: Role, account: Address) -> GovernanceResult<()>;

    fn current_price(&self) -> Amount;

    /// Range the next recommendation must fall in.
    fn price_bounds(&self) -> PriceBounds;

    fn recommendation(&self, id: u64) -> GovernanceResult<PriceRecommendation>;
    fn recommendation_count(&self) -> u64;
    fn history(&self) -> Vec<PriceRecommendation>;
    fn latest(&self) -> Option<PriceRecommendation>;
    fn pending(&self) -> Vec<PriceRecommendation>;
    fn accepted(&self) -> Vec<PriceRecommendation>;
    fn rejected(&self) -> Vec<PriceRecommendation>;

    /// Up to `n` most recent records, newest first. Capped at the page size.
    fn recent(&self, n: usize) -> Vec<PriceRecommendation>;

    /// Records `[offset, offset + limit)`, oldest first. Capped at the page size.
    fn page(&self, offset: usize, limit: usize) -> Vec<PriceRecommendation>;

    fn has_role(&self, role: Role, account: &Address) -> bool;
}
