//! # Ledger Balance Adapter
//!
//! Exposes live ownership to the distribution engine.

use fh_01_ownership_ledger::{OwnershipLedger, OwnershipLedgerApi};
use fh_03_yield_distribution::BalanceProvider;
use shared_types::{Address, Amount};
use std::sync::Arc;

/// Read-only view of the ownership ledger.
#[derive(Clone)]
pub struct LedgerBalanceAdapter {
    ledger: Arc<OwnershipLedger>,
}

impl LedgerBalanceAdapter {
    pub fn new(ledger: Arc<OwnershipLedger>) -> Self {
        Self { ledger }
    }
}

impl BalanceProvider for LedgerBalanceAdapter {
    fn balance_of(&self, holder: &Address) -> Amount {
        self.ledger.balance_of(holder)
    }

    fn total_supply(&self) -> Amount {
        self.ledger.total_supply()
    }
}
