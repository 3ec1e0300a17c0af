//! Driving Ports (API - Inbound)

use crate::domain::{DistributionRecord, PayoutPlan};
use crate::error::DistributionResult;
use shared_types::{Address, Amount, Role, Timestamp};

/// Primary Yield Distribution API
pub trait YieldDistributionApi: Send + Sync {
    /// Collect a rental payment from `caller` into the pool.
    fn receive_rental_payment(&self, caller: Address, amount: Amount) -> DistributionResult<()>;

    /// Register `holder` for distributions. Idempotent.
    fn register_holder(&self, caller: Address, holder: Address) -> DistributionResult<()>;

    /// Register many holders, all or nothing. Already registered ones are skipped.
    fn register_holders(&self, caller: Address, holders: &[Address]) -> DistributionResult<()>;

    /// Register the caller. Requires a nonzero ledger balance.
    fn register_holder_for_self(&self, caller: Address) -> DistributionResult<()>;

    fn unregister_holder(&self, caller: Address, holder: Address) -> DistributionResult<()>;

    /// Pay the pool out pro rata to registered holders' live balances.
    fn distribute_yields(&self, caller: Address) -> DistributionResult<DistributionRecord>;

    /// What `distribute_yields` would pay right now.
    fn preview_distribution(&self) -> DistributionResult<PayoutPlan>;

    fn update_valuation(&self, caller: Address, valuation: Amount) -> DistributionResult<()>;

    fn grant_role(&self, caller: Address, role: Role, account: Address) -> DistributionResult<()>;
    fn revoke_role(&self, caller: Address, role: Role, account: Address) -> DistributionResult<()>;

    /// Annualised yield in basis points since tracking started.
    fn annualized_yield_bps(&self) -> u128;

    /// Sum of `total_amount` over records with `start <= timestamp <= end`.
    fn yields_in_period(&self, start: Timestamp, end: Timestamp) -> Amount;

    /// Cumulative amount paid to `holder`.
    fn holder_yields(&self, holder: &Address) -> Amount;

    fn distribution(&self, id: u64) -> DistributionResult<DistributionRecord>;
    fn distribution_history(&self) -> Vec<DistributionRecord>;

    /// Up to `n` most recent records, newest first. Capped at the page size.
    fn recent_distributions(&self, n: usize) -> Vec<DistributionRecord>;

    fn pool_balance(&self) -> Amount;
    fn distribution_count(&self) -> u64;
    fn total_distributed(&self) -> Amount;
    fn registered_holders(&self) -> Vec<Address>;
    fn is_registered(&self, holder: &Address) -> bool;
    fn registered_holder_count(&self) -> usize;
    fn valuation(&self) -> Amount;

    /// Start of yield tracking: the first payment, or construction before that.
    fn tracking_start(&self) -> Timestamp;

    fn has_role(&self, role: Role, account: &Address) -> bool;
}
