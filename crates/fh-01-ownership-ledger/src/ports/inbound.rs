//! Driving Ports (API - Inbound)
//!
//! Mutating operations take the caller explicitly; identity is never read
//! from ambient state.

use crate::domain::{Partition, TransferReceipt, TransferStatus};
use crate::error::LedgerResult;
use shared_types::{Address, Amount, Role};

/// Primary Ownership Ledger API
///
/// This is the driving port for the ledger subsystem. The distribution
/// engine only ever sees the read half of it, through its own
/// `BalanceProvider` port.
pub trait OwnershipLedgerApi: Send + Sync {
    // --- transfers ---

    /// Move the caller's own units.
    fn transfer(
        &self,
        caller: Address,
        to: Address,
        amount: Amount,
        partition: Option<&Partition>,
    ) -> LedgerResult<TransferReceipt>;

    /// Move `from`'s units as an authorized operator.
    fn transfer_from(
        &self,
        operator: Address,
        from: Address,
        to: Address,
        amount: Amount,
        partition: Option<&Partition>,
    ) -> LedgerResult<TransferReceipt>;

    /// Forced transfer. Whitelist is bypassed.
    fn controller_transfer(
        &self,
        caller: Address,
        from: Address,
        to: Address,
        amount: Amount,
        partition: Option<&Partition>,
    ) -> LedgerResult<TransferReceipt>;

    // --- supply ---

    fn issue(
        &self,
        caller: Address,
        to: Address,
        amount: Amount,
        partition: Option<&Partition>,
    ) -> LedgerResult<()>;

    fn redeem(
        &self,
        caller: Address,
        amount: Amount,
        partition: Option<&Partition>,
    ) -> LedgerResult<TransferReceipt>;

    fn redeem_from(
        &self,
        operator: Address,
        from: Address,
        amount: Amount,
        partition: Option<&Partition>,
    ) -> LedgerResult<TransferReceipt>;

    fn controller_redeem(
        &self,
        caller: Address,
        from: Address,
        amount: Amount,
        partition: Option<&Partition>,
    ) -> LedgerResult<TransferReceipt>;

    // --- one-way flags ---

    fn renounce_control(&self, caller: Address) -> LedgerResult<()>;
    fn renounce_issuance(&self, caller: Address) -> LedgerResult<()>;

    // --- operators ---

    fn authorize_operator(&self, caller: Address, operator: Address) -> LedgerResult<()>;
    fn revoke_operator(&self, caller: Address, operator: Address) -> LedgerResult<()>;
    fn authorize_operator_by_partition(
        &self,
        caller: Address,
        partition: &Partition,
        operator: Address,
    ) -> LedgerResult<()>;
    fn revoke_operator_by_partition(
        &self,
        caller: Address,
        partition: &Partition,
        operator: Address,
    ) -> LedgerResult<()>;

    // --- whitelist ---

    fn add_to_whitelist(&self, caller: Address, address: Address) -> LedgerResult<()>;
    fn remove_from_whitelist(&self, caller: Address, address: Address) -> LedgerResult<()>;
    fn add_batch_to_whitelist(&self, caller: Address, addresses: &[Address]) -> LedgerResult<()>;
    fn remove_batch_from_whitelist(
        &self,
        caller: Address,
        addresses: &[Address],
    ) -> LedgerResult<()>;

    // --- roles ---

    fn grant_role(&self, caller: Address, role: Role, account: Address) -> LedgerResult<()>;
    fn revoke_role(&self, caller: Address, role: Role, account: Address) -> LedgerResult<()>;

    // --- queries ---

    /// Pre-validate a transfer without mutating anything.
    fn can_transfer(
        &self,
        from: Address,
        to: Address,
        amount: Amount,
        partition: Option<&Partition>,
    ) -> TransferStatus;

    /// `floor(balance * 10000 / supply)`, 0 when supply is 0.
    fn ownership_percentage(&self, holder: &Address) -> u128;

    fn balance_of(&self, holder: &Address) -> Amount;
    fn balance_of_by_partition(&self, holder: &Address, partition: &Partition) -> Amount;
    fn partitions_of(&self, holder: &Address) -> Vec<Partition>;
    fn partitions(&self) -> Vec<Partition>;
    fn total_supply(&self) -> Amount;
    fn total_supply_by_partition(&self, partition: &Partition) -> Amount;
    fn is_whitelisted(&self, address: &Address) -> bool;
    fn is_operator(&self, operator: &Address, owner: &Address) -> bool;
    fn is_operator_for_partition(
        &self,
        operator: &Address,
        owner: &Address,
        partition: &Partition,
    ) -> bool;
    fn is_controllable(&self) -> bool;
    fn is_issuable(&self) -> bool;
    fn has_role(&self, role: Role, account: &Address) -> bool;
}
