//! # Error Types
//!
//! Errors shared across subsystems.

use crate::access::Role;
use crate::entities::Address;
use thiserror::Error;

/// Role-check failures raised by [`crate::AccessControl`].
///
/// Every subsystem error enum wraps this through an `Unauthorized` variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// Caller lacks the role required by the operation.
    #[error("account 0x{} is missing role {role}", hex::encode(.account))]
    MissingRole { role: Role, account: Address },

    /// Roles cannot be granted to the zero address.
    #[error("cannot grant role {role} to the zero address")]
    ZeroAddress { role: Role },
}
