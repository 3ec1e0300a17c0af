//! # Property Tests
//!
//! Random trading followed by a distribution, checked against the ledger
//! invariants and the dust bound
//! `paid_out ≤ pool ≤ paid_out + (recipient_count - 1)`.

#[cfg(test)]
mod tests {
    use super::super::*;
    use fh_01_ownership_ledger::{OwnershipLedgerApi, Partition};
    use fh_03_yield_distribution::{PaymentVault, YieldDistributionApi};
    use proptest::prelude::*;

    const HOLDERS: [Address; 4] = [[0x10; 20], [0x11; 20], [0x12; 20], [0x13; 20]];

    fn all_holders() -> Vec<Address> {
        std::iter::once(ISSUER_HOLDER).chain(HOLDERS).collect()
    }

    /// (from index, to index, amount, use a named partition)
    fn trade() -> impl Strategy<Value = (usize, usize, u128, bool)> {
        (0usize..5, 0usize..5, 1u128..500, any::<bool>())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_trading_then_distribution_conserves(
            supply in 1u128..100_000,
            trades in prop::collection::vec(trade(), 0..40),
            pool in 1u128..10_000_000,
        ) {
            let asset = TestAsset::new(supply).with_tenant(pool);
            let ledger = &asset.container.ledger;
            for holder in HOLDERS {
                ledger.add_to_whitelist(ADMIN, holder).unwrap();
            }
            let holders = all_holders();
            let reserved = Partition::new("reserved");

            for (from, to, amount, named) in trades {
                let (from, to) = (holders[from], holders[to]);
                // Failed trades must leave no trace; invariants checked below
                if named {
                    let _ = ledger.controller_transfer(ADMIN, from, to, amount, Some(&reserved));
                    let _ = ledger.issue(ADMIN, to, amount, Some(&reserved));
                } else {
                    let _ = ledger.transfer(from, to, amount, None);
                }
            }
            prop_assert!(ledger.verify_invariants().is_ok());

            let summed: u128 = holders.iter().map(|h| ledger.balance_of(h)).sum();
            prop_assert_eq!(summed, ledger.total_supply());

            let distributor = &asset.container.distributor;
            distributor.register_holders(ADMIN, &HOLDERS).unwrap();
            distributor.receive_rental_payment(TENANT, pool).unwrap();
            let record = distributor.distribute_yields(ADMIN).unwrap();

            prop_assert_eq!(record.recipient_count, 5);
            prop_assert!(record.paid_out <= pool);
            prop_assert!(pool - record.paid_out <= record.recipient_count as u128 - 1);

            let vault = &asset.container.vault;
            let received: u128 = holders.iter().map(|h| vault.wallet_balance(h)).sum();
            prop_assert_eq!(received, record.paid_out);
            prop_assert_eq!(vault.custody_balance(), pool - record.paid_out);
        }

        #[test]
        fn prop_ownership_percentages_never_exceed_whole(
            amounts in prop::collection::vec(0u128..1_000, 4),
        ) {
            let total: u128 = amounts.iter().sum::<u128>() + 1;
            let asset = TestAsset::new(total);
            for (holder, amount) in HOLDERS.iter().zip(&amounts) {
                if *amount > 0 {
                    asset.allocate(*holder, *amount);
                }
            }
            let ledger = &asset.container.ledger;
            let bps: u128 = all_holders()
                .iter()
                .map(|h| ledger.ownership_percentage(h))
                .sum();
            prop_assert!(bps <= 10_000);
            prop_assert!(bps > 10_000 - 5);
        }
    }
}
