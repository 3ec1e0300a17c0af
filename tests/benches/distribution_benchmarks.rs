//! # Freehold Distribution Benchmarks
//!
//! | Operation | Expected cost |
//! |-----------|---------------|
//! | Payout planning | O(N) in registered holders |
//! | Full distribution | O(N) plus one batch disbursement |
//! | Whitelisted transfer | O(P) in partitions held |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;

use fh_01_ownership_ledger::OwnershipLedgerApi;
use fh_03_yield_distribution::domain::plan_payouts;
use fh_03_yield_distribution::YieldDistributionApi;
use freehold_runtime::{AssetConfig, FreeholdContainer};
use shared_types::{Address, ManualTimeSource, Role};

const ADMIN: Address = [0xAD; 20];
const ISSUER: Address = [0x01; 20];
const TENANT: Address = [0x7E; 20];

fn holder(i: usize) -> Address {
    let mut address = [0u8; 20];
    address[12..].copy_from_slice(&(i as u64 + 1).to_be_bytes());
    address[0] = 0xF0;
    address
}

fn asset_with_holders(n: usize) -> FreeholdContainer {
    let config = AssetConfig {
        admin: ADMIN,
        initial_holder: ISSUER,
        initial_supply: 1_000_000_000,
        max_registered_holders: n + 1,
        ..AssetConfig::devnet()
    };
    let container =
        FreeholdContainer::with_time_source(config, Arc::new(ManualTimeSource::new(0)))
            .expect("genesis");
    let holders: Vec<Address> = (0..n).map(holder).collect();
    // Whitelist batches are capped at 200 entries
    for chunk in holders.chunks(200) {
        container
            .ledger
            .add_batch_to_whitelist(ADMIN, chunk)
            .expect("whitelist");
    }
    for (i, h) in holders.iter().enumerate() {
        container
            .ledger
            .transfer(ISSUER, *h, 1_000 + i as u128, None)
            .expect("allocate");
    }
    container
        .distributor
        .register_holders(ADMIN, &holders)
        .expect("register");
    container.vault.fund(TENANT, u128::MAX / 2);
    container
        .distributor
        .grant_role(ADMIN, Role::PaymentSubmitter, TENANT)
        .expect("grant");
    container
}

fn bench_payout_planning(c: &mut Criterion) {
    let mut group = c.benchmark_group("fh-03-payout-planning");
    for size in [10usize, 100, 1_000] {
        let balances: Vec<(Address, u128)> =
            (0..size).map(|i| (holder(i), 1_000 + i as u128)).collect();
        let supply: u128 = balances.iter().map(|(_, b)| b).sum();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("plan_payouts", size), &size, |b, _| {
            b.iter(|| plan_payouts(black_box(1_000_000_007), supply, &balances, 18))
        });
    }
    group.finish();
}

fn bench_distribution(c: &mut Criterion) {
    let mut group = c.benchmark_group("fh-03-distribution");
    group.sample_size(20);
    for size in [10usize, 100, 999] {
        let container = asset_with_holders(size);
        group.throughput(Throughput::Elements(size as u64 + 1));
        group.bench_with_input(BenchmarkId::new("distribute_yields", size), &size, |b, _| {
            b.iter(|| {
                container
                    .distributor
                    .receive_rental_payment(TENANT, 1_000_000)
                    .expect("payment");
                black_box(container.distributor.distribute_yields(ADMIN).expect("distribute"))
            })
        });
    }
    group.finish();
}

fn bench_transfers(c: &mut Criterion) {
    let container = asset_with_holders(2);
    let (a, b) = (holder(0), holder(1));
    c.bench_function("fh-01-transfer-round-trip", |bench| {
        bench.iter(|| {
            container.ledger.transfer(a, b, 1, None).expect("transfer");
            container.ledger.transfer(b, a, 1, None).expect("transfer");
        })
    });
}

criterion_group!(benches, bench_payout_planning, bench_distribution, bench_transfers);
criterion_main!(benches);
