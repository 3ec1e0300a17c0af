//! Transfer-eligibility whitelist.

use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::collections::BTreeSet;

/// Addresses allowed to receive ordinary transfers and issuance.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Whitelist {
    members: BTreeSet<Address>,
}

impl Whitelist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the address was newly added.
    pub fn add(&mut self, address: Address) -> bool {
        self.members.insert(address)
    }

    /// Returns true if the address was present.
    pub fn remove(&mut self, address: &Address) -> bool {
        self.members.remove(address)
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.members.contains(address)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> Vec<Address> {
        self.members.iter().copied().collect()
    }
}
