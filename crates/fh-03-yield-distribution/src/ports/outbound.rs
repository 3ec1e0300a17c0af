//! Outbound (Driven) ports for the Yield Distribution engine.
//!
//! The engine never owns balances or funds. It reads live ownership through
//! [`BalanceProvider`], moves money through [`PaymentVault`] and optionally
//! checks payments against a governed price through [`PriceFeed`].

use crate::error::VaultError;
use shared_types::{Address, Amount};

/// Read-only view of the ownership ledger.
pub trait BalanceProvider: Send + Sync {
    /// Current aggregate balance of `holder`.
    fn balance_of(&self, holder: &Address) -> Amount;

    /// Current total supply.
    fn total_supply(&self) -> Amount;
}

/// Custody of payment funds.
pub trait PaymentVault: Send + Sync {
    /// Move `amount` from `payer` into custody.
    fn collect(&self, payer: &Address, amount: Amount) -> Result<(), VaultError>;

    /// Pay every `(holder, amount)` out of custody, all or nothing.
    fn disburse_batch(&self, payouts: &[(Address, Amount)]) -> Result<(), VaultError>;

    /// Funds currently held in custody.
    fn custody_balance(&self) -> Amount;
}

/// Governed current price, used as the minimum accepted payment.
pub trait PriceFeed: Send + Sync {
    fn current_price(&self) -> Amount;
}

/// Mock balance provider for testing.
#[cfg(test)]
pub struct MockBalanceProvider {
    balances: parking_lot::RwLock<std::collections::HashMap<Address, Amount>>,
}

#[cfg(test)]
impl MockBalanceProvider {
    pub fn new() -> Self {
        Self {
            balances: parking_lot::RwLock::new(std::collections::HashMap::new()),
        }
    }

    pub fn with_balance(self, holder: Address, balance: Amount) -> Self {
        self.set_balance(holder, balance);
        self
    }

    pub fn set_balance(&self, holder: Address, balance: Amount) {
        self.balances.write().insert(holder, balance);
    }
}

#[cfg(test)]
impl BalanceProvider for MockBalanceProvider {
    fn balance_of(&self, holder: &Address) -> Amount {
        self.balances.read().get(holder).copied().unwrap_or(0)
    }

    fn total_supply(&self) -> Amount {
        self.balances.read().values().sum()
    }
}

/// Fixed price feed for testing.
#[cfg(test)]
pub struct MockPriceFeed(pub Amount);

#[cfg(test)]
impl PriceFeed for MockPriceFeed {
    fn current_price(&self) -> Amount {
        self.0
    }
}
