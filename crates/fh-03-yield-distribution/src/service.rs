//! Yield Distribution Service
//!
//! Accumulates rental payments in a pool and pays it out pro rata to the
//! live ledger balances of registered holders.
//!
//! ## Execution model
//!
//! Mutating operations are serialised by a reentrant operation lock with an
//! in-progress flag. A nested mutating call made on the same thread (for
//! example from inside a vault callback) fails with `ReentrantCall`; calls
//! from other threads wait their turn.
//!
//! `distribute_yields` runs checks, then effects (pool cleared, record
//! appended, yields credited), then a single batch disbursement. The state
//! lock is not held during the disbursement. If the vault fails, every effect
//! is reverted and `PayoutFailed` is returned.

use crate::domain::{
    annualized_yield_bps, plan_payouts, DistributionConfig, DistributionRecord, PayoutPlan,
    RegisteredHolders,
};
use crate::error::{DistributionError, DistributionResult};
use crate::events::DistributionEvent;
use crate::ports::{BalanceProvider, PaymentVault, PriceFeed, YieldDistributionApi};
use freehold_telemetry::log_event;
use freehold_telemetry::metrics::{
    amount_to_gauge, record_error, DISTRIBUTIONS_COMPLETED, DISTRIBUTION_PAYMENTS,
    DISTRIBUTION_POOL, DISTRIBUTION_REGISTERED_HOLDERS,
};
use parking_lot::{ReentrantMutex, ReentrantMutexGuard, RwLock};
use shared_types::{
    address_hex, is_zero_address, AccessControl, Address, Amount, Role, TimeSource, Timestamp,
};
use std::cell::Cell;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

const SUBSYSTEM: &str = "yield-distribution";

struct DistributionState {
    pool: Amount,
    /// Index `i` holds distribution id `i + 1`
    records: Vec<DistributionRecord>,
    holders: RegisteredHolders,
    holder_yields: HashMap<Address, Amount>,
    total_distributed: Amount,
    valuation: Amount,
    created_at: Timestamp,
    /// Set by the first successful payment
    tracking_start: Option<Timestamp>,
    access: AccessControl,
    pending_events: Vec<DistributionEvent>,
}

impl DistributionState {
    fn count(&self) -> u64 {
        self.records.len() as u64
    }
}

/// Held for the duration of one mutating operation.
struct OperationGuard<'a> {
    in_progress: ReentrantMutexGuard<'a, Cell<bool>>,
}

impl Drop for OperationGuard<'_> {
    fn drop(&mut self) {
        self.in_progress.set(false);
    }
}

/// Yield Distribution Service
pub struct YieldDistributor<B: BalanceProvider, V: PaymentVault> {
    config: DistributionConfig,
    balances: Arc<B>,
    vault: Arc<V>,
    price_feed: Option<Arc<dyn PriceFeed>>,
    time_source: Arc<dyn TimeSource>,
    operation: ReentrantMutex<Cell<bool>>,
    state: RwLock<DistributionState>,
}

impl<B: BalanceProvider, V: PaymentVault> YieldDistributor<B, V> {
    /// `admin` receives `Admin` and `Manager`. Tracking starts at
    /// construction until the first payment arrives.
    pub fn new(
        config: DistributionConfig,
        admin: Address,
        balances: Arc<B>,
        vault: Arc<V>,
        time_source: Arc<dyn TimeSource>,
    ) -> DistributionResult<Self> {
        if is_zero_address(&admin) {
            return Err(DistributionError::InvalidAddress);
        }
        if config.valuation == 0 {
            return Err(DistributionError::InvalidAmount);
        }

        let created_at = time_source.now();
        log_event!(
            info,
            SUBSYSTEM,
            "Yield distributor created",
            admin = %address_hex(&admin),
            valuation = config.valuation,
            max_registered_holders = config.max_registered_holders
        );

        Ok(Self {
            state: RwLock::new(DistributionState {
                pool: 0,
                records: Vec::new(),
                holders: RegisteredHolders::new(),
                holder_yields: HashMap::new(),
                total_distributed: 0,
                valuation: config.valuation,
                created_at,
                tracking_start: None,
                access: AccessControl::with_roles(admin, &[Role::Admin, Role::Manager]),
                pending_events: Vec::new(),
            }),
            config,
            balances,
            vault,
            price_feed: None,
            time_source,
            operation: ReentrantMutex::new(Cell::new(false)),
        })
    }

    /// Require payments to be at least the feed's current price.
    pub fn with_price_feed(mut self, feed: Arc<dyn PriceFeed>) -> Self {
        self.price_feed = Some(feed);
        self
    }

    pub fn config(&self) -> &DistributionConfig {
        &self.config
    }

    pub fn has_price_feed(&self) -> bool {
        self.price_feed.is_some()
    }

    /// Drain pending events.
    pub fn take_events(&self) -> Vec<DistributionEvent> {
        std::mem::take(&mut self.state.write().pending_events)
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    fn enter(&self) -> DistributionResult<OperationGuard<'_>> {
        let in_progress = self.operation.lock();
        if in_progress.replace(true) {
            return Err(DistributionError::ReentrantCall);
        }
        Ok(OperationGuard { in_progress })
    }

    fn rejected_call(
        &self,
        operation: &'static str,
        caller: &Address,
        err: DistributionError,
    ) -> DistributionError {
        record_error(SUBSYSTEM, err.kind());
        log_event!(
            warn,
            SUBSYSTEM,
            "Distribution operation rejected",
            operation = operation,
            caller = %address_hex(caller),
            error = %err
        );
        err
    }

    /// Pool split against live balances. No side effects.
    fn plan(&self, state: &DistributionState) -> DistributionResult<PayoutPlan> {
        if state.pool == 0 {
            return Err(DistributionError::DistributionPoolEmpty);
        }
        if state.holders.is_empty() {
            return Err(DistributionError::NoRegisteredHolders);
        }
        let total_supply = self.balances.total_supply();
        let balances: Vec<(Address, Amount)> = state
            .holders
            .as_slice()
            .iter()
            .map(|holder| (*holder, self.balances.balance_of(holder)))
            .collect();
        plan_payouts(
            state.pool,
            total_supply,
            &balances,
            self.config.unit_scale_decimals,
        )
    }

    fn check_custody(&self, plan: &PayoutPlan) -> DistributionResult<()> {
        let available = self.vault.custody_balance();
        if available < plan.paid_out {
            return Err(DistributionError::InsufficientCustody {
                required: plan.paid_out,
                available,
            });
        }
        Ok(())
    }

    /// Clear the pool, append the record and credit cumulative yields.
    fn apply_distribution(
        state: &mut DistributionState,
        plan: &PayoutPlan,
        now: Timestamp,
    ) -> DistributionResult<DistributionRecord> {
        let total_distributed = state
            .total_distributed
            .checked_add(plan.pool)
            .ok_or(DistributionError::ArithmeticOverflow)?;

        let record = DistributionRecord {
            id: state.count() + 1,
            total_amount: plan.pool,
            per_unit_amount: plan.per_unit_amount,
            timestamp: now,
            recipient_count: plan.recipient_count(),
            total_supply: plan.total_supply,
            paid_out: plan.paid_out,
        };

        state.pool = 0;
        state.total_distributed = total_distributed;
        state.records.push(record.clone());
        for (holder, amount) in plan.transfers() {
            let cumulative = state.holder_yields.entry(holder).or_insert(0);
            *cumulative = cumulative.saturating_add(amount);
        }
        Ok(record)
    }

    /// Undo [`apply_distribution`](Self::apply_distribution).
    fn revert_distribution(state: &mut DistributionState, plan: &PayoutPlan) {
        state.pool = plan.pool;
        state.total_distributed -= plan.pool;
        state.records.pop();
        for (holder, amount) in plan.transfers() {
            if let Some(cumulative) = state.holder_yields.get_mut(&holder) {
                *cumulative -= amount;
                if *cumulative == 0 {
                    state.holder_yields.remove(&holder);
                }
            }
        }
    }

    fn register(
        &self,
        state: &mut DistributionState,
        holders: &[Address],
    ) -> DistributionResult<usize> {
        let fresh = state
            .holders
            .plan_registration(holders, self.config.max_registered_holders)?;
        state.holders.extend(&fresh);
        for holder in &fresh {
            state
                .pending_events
                .push(DistributionEvent::HolderRegistered { holder: *holder });
        }
        DISTRIBUTION_REGISTERED_HOLDERS.set(state.holders.len() as f64);
        Ok(fresh.len())
    }
}

impl<B: BalanceProvider, V: PaymentVault> YieldDistributionApi for YieldDistributor<B, V> {
    fn receive_rental_payment(&self, caller: Address, amount: Amount) -> DistributionResult<()> {
        let _op = self
            .enter()
            .map_err(|e| self.rejected_call("receive_rental_payment", &caller, e))?;
        let now = self.time_source.now();

        let new_pool = {
            let state = self.state.read();
            let checks = || -> DistributionResult<Amount> {
                state.access.require(Role::PaymentSubmitter, &caller)?;
                if amount == 0 {
                    return Err(DistributionError::InvalidAmount);
                }
                if let Some(feed) = &self.price_feed {
                    let expected = feed.current_price();
                    if amount < expected {
                        return Err(DistributionError::PaymentBelowExpectedPrice {
                            amount,
                            expected,
                        });
                    }
                }
                state
                    .pool
                    .checked_add(amount)
                    .ok_or(DistributionError::ArithmeticOverflow)
            };
            checks().map_err(|e| self.rejected_call("receive_rental_payment", &caller, e))?
        };

        self.vault
            .collect(&caller, amount)
            .map_err(DistributionError::PaymentTransferFailed)
            .map_err(|e| self.rejected_call("receive_rental_payment", &caller, e))?;

        let mut state = self.state.write();
        state.pool = new_pool;
        let tracking_start = *state.tracking_start.get_or_insert(now);
        state.pending_events.push(DistributionEvent::PaymentReceived {
            payer: caller,
            amount,
            pool: new_pool,
        });

        DISTRIBUTION_PAYMENTS.inc();
        DISTRIBUTION_POOL.set(amount_to_gauge(new_pool));
        log_event!(
            info,
            SUBSYSTEM,
            "Rental payment received",
            payer = %address_hex(&caller),
            amount = amount,
            pool = new_pool,
            tracking_start = tracking_start
        );
        Ok(())
    }

    fn register_holder(&self, caller: Address, holder: Address) -> DistributionResult<()> {
        self.register_holders(caller, &[holder])
    }

    fn register_holders(&self, caller: Address, holders: &[Address]) -> DistributionResult<()> {
        let _op = self
            .enter()
            .map_err(|e| self.rejected_call("register_holders", &caller, e))?;
        let mut state = self.state.write();

        let added = state
            .access
            .require(Role::Manager, &caller)
            .map_err(DistributionError::from)
            .and_then(|_| self.register(&mut state, holders))
            .map_err(|e| self.rejected_call("register_holders", &caller, e))?;

        log_event!(
            info,
            SUBSYSTEM,
            "Holders registered",
            requested = holders.len(),
            added = added,
            registered = state.holders.len()
        );
        Ok(())
    }

    fn register_holder_for_self(&self, caller: Address) -> DistributionResult<()> {
        let _op = self
            .enter()
            .map_err(|e| self.rejected_call("register_holder_for_self", &caller, e))?;

        let checks = || -> DistributionResult<()> {
            if is_zero_address(&caller) {
                return Err(DistributionError::InvalidAddress);
            }
            if self.balances.balance_of(&caller) == 0 {
                return Err(DistributionError::NoTokenBalance { holder: caller });
            }
            Ok(())
        };
        checks().map_err(|e| self.rejected_call("register_holder_for_self", &caller, e))?;

        let mut state = self.state.write();
        let added = self
            .register(&mut state, &[caller])
            .map_err(|e| self.rejected_call("register_holder_for_self", &caller, e))?;
        if added > 0 {
            log_event!(
                info,
                SUBSYSTEM,
                "Holder self-registered",
                holder = %address_hex(&caller)
            );
        }
        Ok(())
    }

    fn unregister_holder(&self, caller: Address, holder: Address) -> DistributionResult<()> {
        let _op = self
            .enter()
            .map_err(|e| self.rejected_call("unregister_holder", &caller, e))?;
        let mut state = self.state.write();

        state
            .access
            .require(Role::Manager, &caller)
            .map_err(DistributionError::from)
            .and_then(|_| {
                if state.holders.remove(&holder) {
                    Ok(())
                } else {
                    Err(DistributionError::HolderNotRegistered { holder })
                }
            })
            .map_err(|e| self.rejected_call("unregister_holder", &caller, e))?;

        state
            .pending_events
            .push(DistributionEvent::HolderUnregistered { holder });
        DISTRIBUTION_REGISTERED_HOLDERS.set(state.holders.len() as f64);
        log_event!(
            info,
            SUBSYSTEM,
            "Holder unregistered",
            holder = %address_hex(&holder)
        );
        Ok(())
    }

    fn distribute_yields(&self, caller: Address) -> DistributionResult<DistributionRecord> {
        let _op = self
            .enter()
            .map_err(|e| self.rejected_call("distribute_yields", &caller, e))?;
        let now = self.time_source.now();

        // Checks, then effects
        let (record, plan) = {
            let mut state = self.state.write();
            let plan = state
                .access
                .require(Role::Manager, &caller)
                .map_err(DistributionError::from)
                .and_then(|_| self.plan(&state))
                .and_then(|plan| self.check_custody(&plan).map(|_| plan))
                .map_err(|e| self.rejected_call("distribute_yields", &caller, e))?;
            let record = Self::apply_distribution(&mut state, &plan, now)
                .map_err(|e| self.rejected_call("distribute_yields", &caller, e))?;
            (record, plan)
        };

        // Interactions
        let transfers = plan.transfers();
        if let Err(err) = self.vault.disburse_batch(&transfers) {
            Self::revert_distribution(&mut self.state.write(), &plan);
            return Err(self.rejected_call(
                "distribute_yields",
                &caller,
                DistributionError::PayoutFailed(err),
            ));
        }

        let mut state = self.state.write();
        state.pending_events.push(DistributionEvent::YieldsDistributed {
            id: record.id,
            total_amount: record.total_amount,
            paid_out: record.paid_out,
            recipient_count: record.recipient_count,
        });
        for (holder, amount) in transfers {
            state.pending_events.push(DistributionEvent::YieldPaid {
                distribution_id: record.id,
                holder,
                amount,
            });
        }

        DISTRIBUTIONS_COMPLETED.inc();
        DISTRIBUTION_POOL.set(0.0);
        log_event!(
            info,
            SUBSYSTEM,
            "Yields distributed",
            id = record.id,
            total_amount = record.total_amount,
            paid_out = record.paid_out,
            dust = record.dust(),
            recipient_count = record.recipient_count
        );
        Ok(record)
    }

    fn preview_distribution(&self) -> DistributionResult<PayoutPlan> {
        let state = self.state.read();
        let plan = self.plan(&state)?;
        debug!(
            subsystem = SUBSYSTEM,
            pool = plan.pool,
            paid_out = plan.paid_out,
            recipients = plan.payouts.len(),
            "Distribution previewed"
        );
        Ok(plan)
    }

    fn update_valuation(&self, caller: Address, valuation: Amount) -> DistributionResult<()> {
        let _op = self
            .enter()
            .map_err(|e| self.rejected_call("update_valuation", &caller, e))?;
        let mut state = self.state.write();

        state
            .access
            .require(Role::Manager, &caller)
            .map_err(DistributionError::from)
            .and_then(|_| {
                if valuation == 0 {
                    Err(DistributionError::InvalidAmount)
                } else {
                    Ok(())
                }
            })
            .map_err(|e| self.rejected_call("update_valuation", &caller, e))?;

        let previous = std::mem::replace(&mut state.valuation, valuation);
        state.pending_events.push(DistributionEvent::ValuationUpdated {
            previous,
            current: valuation,
        });
        log_event!(
            info,
            SUBSYSTEM,
            "Valuation updated",
            previous = previous,
            current = valuation
        );
        Ok(())
    }

    fn grant_role(&self, caller: Address, role: Role, account: Address) -> DistributionResult<()> {
        let _op = self
            .enter()
            .map_err(|e| self.rejected_call("grant_role", &caller, e))?;
        let mut state = self.state.write();
        let granted = state
            .access
            .grant(&caller, role, account)
            .map_err(|e| self.rejected_call("grant_role", &caller, e.into()))?;
        if granted {
            state.pending_events.push(DistributionEvent::RoleGranted {
                role,
                account,
                by: caller,
            });
            log_event!(info, SUBSYSTEM, "Role granted", role = %role, account = %address_hex(&account));
        }
        Ok(())
    }

    fn revoke_role(&self, caller: Address, role: Role, account: Address) -> DistributionResult<()> {
        let _op = self
            .enter()
            .map_err(|e| self.rejected_call("revoke_role", &caller, e))?;
        let mut state = self.state.write();
        let revoked = state
            .access
            .revoke(&caller, role, &account)
            .map_err(|e| self.rejected_call("revoke_role", &caller, e.into()))?;
        if revoked {
            state.pending_events.push(DistributionEvent::RoleRevoked {
                role,
                account,
                by: caller,
            });
            log_event!(info, SUBSYSTEM, "Role revoked", role = %role, account = %address_hex(&account));
        }
        Ok(())
    }

    fn annualized_yield_bps(&self) -> u128 {
        let state = self.state.read();
        if state.records.is_empty() {
            return 0;
        }
        let start = state.tracking_start.unwrap_or(state.created_at);
        let elapsed = self.time_source.now().saturating_sub(start);
        annualized_yield_bps(
            state.total_distributed,
            state.valuation,
            self.config.payment_decimals,
            self.config.valuation_decimals,
            elapsed,
        )
    }

    fn yields_in_period(&self, start: Timestamp, end: Timestamp) -> Amount {
        self.state
            .read()
            .records
            .iter()
            .filter(|r| start <= r.timestamp && r.timestamp <= end)
            .fold(0u128, |acc, r| acc.saturating_add(r.total_amount))
    }

    fn holder_yields(&self, holder: &Address) -> Amount {
        self.state
            .read()
            .holder_yields
            .get(holder)
            .copied()
            .unwrap_or(0)
    }

    fn distribution(&self, id: u64) -> DistributionResult<DistributionRecord> {
        let state = self.state.read();
        if id == 0 || id > state.count() {
            return Err(DistributionError::InvalidDistributionId {
                id,
                count: state.count(),
            });
        }
        Ok(state.records[(id - 1) as usize].clone())
    }

    fn distribution_history(&self) -> Vec<DistributionRecord> {
        self.state.read().records.clone()
    }

    fn recent_distributions(&self, n: usize) -> Vec<DistributionRecord> {
        let n = n.min(self.config.max_page_size);
        self.state
            .read()
            .records
            .iter()
            .rev()
            .take(n)
            .cloned()
            .collect()
    }

    fn pool_balance(&self) -> Amount {
        self.state.read().pool
    }

    fn distribution_count(&self) -> u64 {
        self.state.read().count()
    }

    fn total_distributed(&self) -> Amount {
        self.state.read().total_distributed
    }

    fn registered_holders(&self) -> Vec<Address> {
        self.state.read().holders.as_slice().to_vec()
    }

    fn is_registered(&self, holder: &Address) -> bool {
        self.state.read().holders.contains(holder)
    }

    fn registered_holder_count(&self) -> usize {
        self.state.read().holders.len()
    }

    fn valuation(&self) -> Amount {
        self.state.read().valuation
    }

    fn tracking_start(&self) -> Timestamp {
        let state = self.state.read();
        state.tracking_start.unwrap_or(state.created_at)
    }

    fn has_role(&self, role: Role, account: &Address) -> bool {
        self.state.read().access.has_role(role, account)
    }
}
