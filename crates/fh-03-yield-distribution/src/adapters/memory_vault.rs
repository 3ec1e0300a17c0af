//! In-memory payment vault.
//!
//! Keeps payer wallets and a single custody balance. Batch disbursement is
//! validated in full before any wallet is credited.

use crate::error::VaultError;
use crate::ports::PaymentVault;
use parking_lot::Mutex;
use shared_types::{Address, Amount};
use std::collections::HashMap;

#[derive(Debug, Default)]
struct VaultBook {
    wallets: HashMap<Address, Amount>,
    custody: Amount,
    frozen: bool,
}

/// Payment vault backed by a `HashMap` of wallets.
#[derive(Debug, Default)]
pub struct InMemoryPaymentVault {
    book: Mutex<VaultBook>,
}

impl InMemoryPaymentVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `address`'s wallet with outside funds.
    pub fn fund(&self, address: Address, amount: Amount) {
        let mut book = self.book.lock();
        let wallet = book.wallets.entry(address).or_insert(0);
        *wallet = wallet.saturating_add(amount);
    }

    pub fn wallet_balance(&self, address: &Address) -> Amount {
        self.book.lock().wallets.get(address).copied().unwrap_or(0)
    }

    /// While frozen, every disbursement is rejected.
    pub fn set_frozen(&self, frozen: bool) {
        self.book.lock().frozen = frozen;
    }
}

impl PaymentVault for InMemoryPaymentVault {
    fn collect(&self, payer: &Address, amount: Amount) -> Result<(), VaultError> {
        let mut book = self.book.lock();
        let available = book.wallets.get(payer).copied().unwrap_or(0);
        if available < amount {
            return Err(VaultError::InsufficientFunds {
                payer: *payer,
                required: amount,
                available,
            });
        }
        let custody = book
            .custody
            .checked_add(amount)
            .ok_or_else(|| VaultError::Rejected("custody overflow".into()))?;
        book.wallets.insert(*payer, available - amount);
        book.custody = custody;
        Ok(())
    }

    fn disburse_batch(&self, payouts: &[(Address, Amount)]) -> Result<(), VaultError> {
        let mut book = self.book.lock();
        if book.frozen {
            return Err(VaultError::Rejected("disbursements frozen".into()));
        }
        let required = payouts
            .iter()
            .try_fold(0u128, |acc, (_, amount)| acc.checked_add(*amount))
            .ok_or_else(|| VaultError::Rejected("batch total overflow".into()))?;
        if required > book.custody {
            return Err(VaultError::InsufficientCustody {
                required,
                available: book.custody,
            });
        }

        book.custody -= required;
        for (holder, amount) in payouts {
            let wallet = book.wallets.entry(*holder).or_insert(0);
            *wallet = wallet.saturating_add(*amount);
        }
        Ok(())
    }

    fn custody_balance(&self) -> Amount {
        self.book.lock().custody
    }
}
