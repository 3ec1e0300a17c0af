//! Operator authorizations.
//!
//! An operator may move or redeem an owner's units. Global authorizations
//! cover every partition; partition authorizations cover only the named one.

use super::entities::Partition;
use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::collections::HashSet;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct OperatorRegistry {
    /// (owner, operator)
    global: HashSet<(Address, Address)>,
    /// (owner, partition, operator)
    by_partition: HashSet<(Address, Partition, Address)>,
}

impl OperatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn authorize(&mut self, owner: Address, operator: Address) -> bool {
        self.global.insert((owner, operator))
    }

    pub fn revoke(&mut self, owner: &Address, operator: &Address) -> bool {
        self.global.remove(&(*owner, *operator))
    }

    pub fn authorize_for_partition(
        &mut self,
        owner: Address,
        partition: Partition,
        operator: Address,
    ) -> bool {
        self.by_partition.insert((owner, partition, operator))
    }

    pub fn revoke_for_partition(
        &mut self,
        owner: &Address,
        partition: &Partition,
        operator: &Address,
    ) -> bool {
        self.by_partition
            .remove(&(*owner, partition.clone(), *operator))
    }

    /// Global authorization only.
    pub fn is_operator(&self, operator: &Address, owner: &Address) -> bool {
        self.global.contains(&(*owner, *operator))
    }

    /// Global authorization, or authorization scoped to `partition`.
    pub fn is_operator_for_partition(
        &self,
        operator: &Address,
        owner: &Address,
        partition: &Partition,
    ) -> bool {
        self.is_operator(operator, owner)
            || self
                .by_partition
                .contains(&(*owner, partition.clone(), *operator))
    }

    /// Operator check for a move that may or may not name a partition.
    ///
    /// Unpartitioned moves can draw from any partition and so require global
    /// authorization.
    pub fn may_act_for(
        &self,
        operator: &Address,
        owner: &Address,
        partition: Option<&Partition>,
    ) -> bool {
        match partition {
            Some(partition) => self.is_operator_for_partition(operator, owner, partition),
            None => self.is_operator(operator, owner),
        }
    }
}
