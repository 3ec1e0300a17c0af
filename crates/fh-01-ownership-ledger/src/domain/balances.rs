//! Partitioned balance table.
//!
//! Two-level map `holder -> partition -> amount` with a cached aggregate per
//! holder, per-partition supply, and a ledger-wide partition registry that
//! fixes the draw-down order for unpartitioned transfers.
//!
//! ## Invariants
//!
//! - INVARIANT-1: Σ aggregate balances == total supply
//! - INVARIANT-2: for every holder, Σ partition amounts == aggregate
//! - INVARIANT-3: for every partition, Σ holder amounts == partition supply
//! - Registry order: default partition first, then creation order

use super::entities::{BalanceEntry, Partition, PartitionLeg};
use crate::error::{LedgerError, LedgerResult};
use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount};
use std::collections::HashMap;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct HolderAccount {
    aggregate: Amount,
    partitions: HashMap<Partition, Amount>,
}

/// Balance table with partition index.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PartitionedBalances {
    accounts: HashMap<Address, HolderAccount>,
    registry: Vec<Partition>,
    partition_supply: HashMap<Partition, Amount>,
    total_supply: Amount,
}

impl Default for PartitionedBalances {
    fn default() -> Self {
        Self::new()
    }
}

impl PartitionedBalances {
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
            registry: vec![Partition::default_partition()],
            partition_supply: HashMap::new(),
            total_supply: 0,
        }
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    pub fn partition_supply(&self, partition: &Partition) -> Amount {
        self.partition_supply.get(partition).copied().unwrap_or(0)
    }

    pub fn balance_of(&self, holder: &Address) -> Amount {
        self.accounts.get(holder).map(|a| a.aggregate).unwrap_or(0)
    }

    pub fn balance_of_partition(&self, holder: &Address, partition: &Partition) -> Amount {
        self.accounts
            .get(holder)
            .and_then(|a| a.partitions.get(partition))
            .copied()
            .unwrap_or(0)
    }

    /// All partitions ever created, default first.
    pub fn partitions(&self) -> &[Partition] {
        &self.registry
    }

    /// Partitions in which `holder` has a nonzero balance, in draw order.
    pub fn partitions_of(&self, holder: &Address) -> Vec<Partition> {
        let Some(account) = self.accounts.get(holder) else {
            return Vec::new();
        };
        self.registry
            .iter()
            .filter(|p| account.partitions.get(*p).copied().unwrap_or(0) > 0)
            .cloned()
            .collect()
    }

    /// Balance rows for `holder`, in draw order.
    pub fn entries_of(&self, holder: &Address) -> Vec<BalanceEntry> {
        self.partitions_of(holder)
            .into_iter()
            .map(|partition| BalanceEntry {
                holder: *holder,
                amount: self.balance_of_partition(holder, &partition),
                partition,
            })
            .collect()
    }

    /// Number of holders with a nonzero balance.
    pub fn holder_count(&self) -> usize {
        self.accounts.values().filter(|a| a.aggregate > 0).count()
    }

    /// Register `partition` if it has never been seen. Returns true if created.
    pub fn ensure_partition(&mut self, partition: &Partition) -> bool {
        if self.registry.contains(partition) {
            return false;
        }
        self.registry.push(partition.clone());
        true
    }

    /// Work out which partitions `amount` is drawn from without mutating.
    ///
    /// With `partition = Some(p)` the whole amount comes from `p`. Without a
    /// partition the holder's partitions are drained in registry order until
    /// the amount is covered.
    pub fn plan_draw(
        &self,
        holder: &Address,
        amount: Amount,
        partition: Option<&Partition>,
    ) -> LedgerResult<Vec<PartitionLeg>> {
        if let Some(partition) = partition {
            let available = self.balance_of_partition(holder, partition);
            if available < amount {
                return Err(LedgerError::InsufficientPartitionBalance {
                    partition: partition.clone(),
                    required: amount,
                    available,
                });
            }
            return Ok(vec![PartitionLeg {
                partition: partition.clone(),
                amount,
            }]);
        }

        let available = self.balance_of(holder);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                required: amount,
                available,
            });
        }

        let mut remaining = amount;
        let mut legs = Vec::new();
        for partition in self.partitions_of(holder) {
            if remaining == 0 {
                break;
            }
            let take = self.balance_of_partition(holder, &partition).min(remaining);
            remaining -= take;
            legs.push(PartitionLeg {
                partition,
                amount: take,
            });
        }

        if remaining > 0 {
            // Aggregate said enough but partitions disagree
            return Err(LedgerError::InvariantViolation {
                reason: format!(
                    "aggregate balance {} does not match partition balances",
                    available
                ),
            });
        }
        Ok(legs)
    }

    /// Move planned legs from `from` to `to`. Legs must come from [`plan_draw`].
    ///
    /// [`plan_draw`]: PartitionedBalances::plan_draw
    pub fn move_legs(&mut self, from: &Address, to: &Address, legs: &[PartitionLeg]) {
        for leg in legs {
            self.debit(from, &leg.partition, leg.amount);
            self.credit(to, &leg.partition, leg.amount);
        }
    }

    /// Create `amount` new units for `to` in `partition`.
    pub fn mint(&mut self, to: &Address, partition: &Partition, amount: Amount) -> LedgerResult<()> {
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::SupplyOverflow)?;
        self.ensure_partition(partition);
        self.total_supply = new_supply;
        *self.partition_supply.entry(partition.clone()).or_insert(0) += amount;
        self.credit(to, partition, amount);
        Ok(())
    }

    /// Destroy planned legs held by `from`. Legs must come from [`plan_draw`].
    ///
    /// [`plan_draw`]: PartitionedBalances::plan_draw
    pub fn burn_legs(&mut self, from: &Address, legs: &[PartitionLeg]) {
        for leg in legs {
            self.debit(from, &leg.partition, leg.amount);
            self.total_supply = self.total_supply.saturating_sub(leg.amount);
            if let Some(supply) = self.partition_supply.get_mut(&leg.partition) {
                *supply = supply.saturating_sub(leg.amount);
            }
        }
    }

    /// Recompute every invariant from the raw rows.
    pub fn check_invariants(&self) -> LedgerResult<()> {
        let mut aggregate_sum: Amount = 0;
        let mut per_partition: HashMap<&Partition, Amount> = HashMap::new();

        for (holder, account) in &self.accounts {
            let mut partition_sum: Amount = 0;
            for (partition, amount) in &account.partitions {
                partition_sum = partition_sum
                    .checked_add(*amount)
                    .ok_or_else(|| overflow("partition sum"))?;
                let slot = per_partition.entry(partition).or_insert(0);
                *slot = slot
                    .checked_add(*amount)
                    .ok_or_else(|| overflow("partition supply"))?;
            }
            if partition_sum != account.aggregate {
                return Err(LedgerError::InvariantViolation {
                    reason: format!(
                        "holder 0x{}: partitions sum to {} but aggregate is {}",
                        hex::encode(holder),
                        partition_sum,
                        account.aggregate
                    ),
                });
            }
            aggregate_sum = aggregate_sum
                .checked_add(account.aggregate)
                .ok_or_else(|| overflow("aggregate sum"))?;
        }

        if aggregate_sum != self.total_supply {
            return Err(LedgerError::InvariantViolation {
                reason: format!(
                    "balances sum to {} but total supply is {}",
                    aggregate_sum, self.total_supply
                ),
            });
        }

        for partition in &self.registry {
            let held = per_partition.get(partition).copied().unwrap_or(0);
            let supply = self.partition_supply(partition);
            if held != supply {
                return Err(LedgerError::InvariantViolation {
                    reason: format!(
                        "partition {}: balances sum to {} but supply is {}",
                        partition, held, supply
                    ),
                });
            }
        }
        Ok(())
    }

    fn credit(&mut self, holder: &Address, partition: &Partition, amount: Amount) {
        let account = self.accounts.entry(*holder).or_default();
        *account.partitions.entry(partition.clone()).or_insert(0) += amount;
        account.aggregate += amount;
    }

    fn debit(&mut self, holder: &Address, partition: &Partition, amount: Amount) {
        let Some(account) = self.accounts.get_mut(holder) else {
            return;
        };
        if let Some(slot) = account.partitions.get_mut(partition) {
            debug_assert!(*slot >= amount, "debit exceeds partition balance");
            *slot = slot.saturating_sub(amount);
            if *slot == 0 {
                account.partitions.remove(partition);
            }
        }
        account.aggregate = account.aggregate.saturating_sub(amount);
    }
}

fn overflow(what: &str) -> LedgerError {
    LedgerError::InvariantViolation {
        reason: format!("{} overflows u128", what),
    }
}
