//! # Role-Based Access Control
//!
//! Every mutating operation in the ledger, governance and distribution
//! subsystems starts with a role lookup against an [`AccessControl`] table.
//!
//! ## Design
//!
//! - Role table is a plain `Role -> {Address}` map, no inheritance
//! - Only `Admin` may grant or revoke roles
//! - Assignment at construction goes through [`AccessControl::with_roles`]

use crate::entities::{is_zero_address, Address};
use crate::errors::AccessError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Roles that gate mutating operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// Administers roles and one-way flags.
    Admin,
    /// Whitelist, recommendation decisions, holder registration, distribution.
    Manager,
    /// Mints new units.
    Issuer,
    /// Forced transfers and redemptions while control is enabled.
    Controller,
    /// Deposits rental income into the distribution pool.
    PaymentSubmitter,
    /// Submits price recommendations.
    RecommendationSubmitter,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Issuer => "issuer",
            Role::Controller => "controller",
            Role::PaymentSubmitter => "payment-submitter",
            Role::RecommendationSubmitter => "recommendation-submitter",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role -> account-set table.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AccessControl {
    members: HashMap<Role, BTreeSet<Address>>,
}

impl AccessControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table with `account` holding every role in `roles`.
    pub fn with_roles(account: Address, roles: &[Role]) -> Self {
        let mut table = Self::new();
        for role in roles {
            table.assign(*role, account);
        }
        table
    }

    /// Check whether `account` holds `role`.
    pub fn has_role(&self, role: Role, account: &Address) -> bool {
        self.members
            .get(&role)
            .map(|set| set.contains(account))
            .unwrap_or(false)
    }

    /// Fail with [`AccessError::MissingRole`] unless `account` holds `role`.
    pub fn require(&self, role: Role, account: &Address) -> Result<(), AccessError> {
        if self.has_role(role, account) {
            Ok(())
        } else {
            Err(AccessError::MissingRole {
                role,
                account: *account,
            })
        }
    }

    /// Grant `role` to `account`. Caller must be `Admin`.
    ///
    /// Returns `true` if the account did not already hold the role.
    pub fn grant(
        &mut self,
        caller: &Address,
        role: Role,
        account: Address,
    ) -> Result<bool, AccessError> {
        self.require(Role::Admin, caller)?;
        if is_zero_address(&account) {
            return Err(AccessError::ZeroAddress { role });
        }
        Ok(self.assign(role, account))
    }

    /// Revoke `role` from `account`. Caller must be `Admin`.
    ///
    /// Returns `true` if the account held the role.
    pub fn revoke(
        &mut self,
        caller: &Address,
        role: Role,
        account: &Address,
    ) -> Result<bool, AccessError> {
        self.require(Role::Admin, caller)?;
        Ok(self
            .members
            .get_mut(&role)
            .map(|set| set.remove(account))
            .unwrap_or(false))
    }

    /// Accounts holding `role`, in address order.
    pub fn members(&self, role: Role) -> Vec<Address> {
        self.members
            .get(&role)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    fn assign(&mut self, role: Role, account: Address) -> bool {
        self.members.entry(role).or_default().insert(account)
    }
}
