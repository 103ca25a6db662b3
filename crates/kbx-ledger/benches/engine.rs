//! Throughput of the hot ledger paths

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use kbx_ledger::{Ledger, SharedLedger};
use kbx_primitives::{Address, Amount};

const OWNER: Address = Address::from_low_u8(1);
const SPENDER: Address = Address::from_low_u8(2);

fn funded_ledger() -> Ledger {
    let mut ledger = Ledger::new("Bench", "BCH", 18, Amount::MAX, OWNER);
    ledger.approve(OWNER, SPENDER, Amount::MAX).unwrap();
    ledger.add_address_to_blacklist(OWNER, OWNER).unwrap();
    for i in 0..64u8 {
        ledger.add_address_to_whitelist(OWNER, Address::from_low_u8(0x80 + i)).unwrap();
    }
    ledger
}

fn bench_transfer(c: &mut Criterion) {
    c.bench_function("transfer_gated", |b| {
        b.iter_batched_ref(
            funded_ledger,
            |ledger| {
                for i in 0..64u8 {
                    let to = Address::from_low_u8(0x80 + i);
                    ledger.transfer(OWNER, black_box(to), Amount::one()).unwrap();
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_transfer_from(c: &mut Criterion) {
    c.bench_function("transfer_from", |b| {
        b.iter_batched_ref(
            funded_ledger,
            |ledger| {
                for i in 0..64u8 {
                    let to = Address::from_low_u8(0x80 + i);
                    ledger
                        .transfer_from(SPENDER, OWNER, black_box(to), Amount::one())
                        .unwrap();
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_shared_transfer(c: &mut Criterion) {
    let shared = SharedLedger::new(funded_ledger());
    let to = Address::from_low_u8(0x80);
    c.bench_function("shared_transfer", |b| {
        b.iter(|| shared.transfer(OWNER, black_box(to), Amount::one()).unwrap())
    });
}

criterion_group!(benches, bench_transfer, bench_transfer_from, bench_shared_transfer);
criterion_main!(benches);
