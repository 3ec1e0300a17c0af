//! Registered holder set.
//!
//! Ordered by registration; iteration order is the payout order.

use crate::error::{DistributionError, DistributionResult};
use serde::{Deserialize, Serialize};
use shared_types::{is_zero_address, Address};
use std::collections::HashSet;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RegisteredHolders {
    order: Vec<Address>,
    members: HashSet<Address>,
}

impl RegisteredHolders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, holder: &Address) -> bool {
        self.members.contains(holder)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn as_slice(&self) -> &[Address] {
        &self.order
    }

    /// Check that every address in `holders` could be registered under `limit`.
    ///
    /// Returns the addresses that are not yet registered, deduplicated, in
    /// input order.
    pub fn plan_registration(
        &self,
        holders: &[Address],
        limit: usize,
    ) -> DistributionResult<Vec<Address>> {
        let mut fresh = Vec::new();
        let mut seen = HashSet::new();
        for holder in holders {
            if is_zero_address(holder) {
                return Err(DistributionError::InvalidAddress);
            }
            if !self.contains(holder) && seen.insert(*holder) {
                fresh.push(*holder);
            }
        }
        if self.len() + fresh.len() > limit {
            return Err(DistributionError::HolderLimitReached { limit });
        }
        Ok(fresh)
    }

    /// Append addresses returned by [`plan_registration`].
    ///
    /// [`plan_registration`]: RegisteredHolders::plan_registration
    pub fn extend(&mut self, fresh: &[Address]) {
        for holder in fresh {
            if self.members.insert(*holder) {
                self.order.push(*holder);
            }
        }
    }

    /// Returns true if the holder was registered.
    pub fn remove(&mut self, holder: &Address) -> bool {
        if !self.members.remove(holder) {
            return false;
        }
        self.order.retain(|h| h != holder);
        true
    }
}
