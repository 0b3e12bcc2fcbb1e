//! Coordinator benchmarks: full lot lifecycle and snapshot queries

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use gavel_core::config::AuctionConfig;
use gavel_core::core::{Bidder, BidderId, Category, Item, ItemId};
use gavel_core::engine::Coordinator;
use gavel_core::notify::NullNotifier;
use gavel_core::store::MemoryStore;
use gavel_policies::PerTierPolicy;
use rust_decimal_macros::dec;

fn coordinator() -> Coordinator<MemoryStore, NullNotifier, PerTierPolicy> {
    let mut items = Vec::new();
    for i in 0..4 {
        items.push(Item::new(
            ItemId::from(format!("a{}", i).as_str()),
            format!("A-{}", i),
            Category::A,
            dec!(15_000),
        ));
    }
    for i in 0..12 {
        items.push(Item::new(
            ItemId::from(format!("b{}", i).as_str()),
            format!("B-{}", i),
            Category::B,
            dec!(8_000),
        ));
    }
    for i in 0..16 {
        items.push(Item::new(
            ItemId::from(format!("c{}", i).as_str()),
            format!("C-{}", i),
            Category::C,
            dec!(5_000),
        ));
    }
    let bidders = (0..8)
        .map(|i| {
            Bidder::new(
                BidderId::from(format!("t{}", i).as_str()),
                format!("Team {}", i),
                dec!(130_000),
            )
        })
        .collect();

    Coordinator::with_seed(
        MemoryStore::load(items, bidders),
        NullNotifier,
        PerTierPolicy::default(),
        AuctionConfig::default(),
        42,
    )
}

/// Start → bid → match ×2 → lottery → close, on a fresh engine each pass
fn bench_lot_cycle(c: &mut Criterion) {
    c.bench_function("lot_cycle", |b| {
        b.iter_batched(
            coordinator,
            |engine| {
                engine.start(&ItemId::from("a0")).unwrap();
                engine.place_bid(&BidderId::from("t0"), None).unwrap();
                engine.match_bid(&BidderId::from("t1")).unwrap();
                engine.match_bid(&BidderId::from("t2")).unwrap();
                engine.run_lottery().unwrap();
                black_box(engine.close(false).unwrap());
            },
            BatchSize::SmallInput,
        );
    });
}

/// A single accepted opening bid, fresh lot each pass
fn bench_place_bid(c: &mut Criterion) {
    c.bench_function("place_bid", |b| {
        b.iter_batched(
            || {
                let engine = coordinator();
                engine.start(&ItemId::from("a0")).unwrap();
                engine
            },
            |engine| black_box(engine.place_bid(&BidderId::from("t0"), None).unwrap()),
            BatchSize::SmallInput,
        );
    });
}

fn bench_snapshots(c: &mut Criterion) {
    let engine = coordinator();
    engine.start(&ItemId::from("a0")).unwrap();
    engine.place_bid(&BidderId::from("t0"), None).unwrap();

    c.bench_function("snapshot_current", |b| {
        b.iter(|| black_box(engine.current()));
    });
    c.bench_function("snapshot_full_state", |b| {
        b.iter(|| black_box(engine.full_state()));
    });
}

criterion_group!(benches, bench_lot_cycle, bench_place_bid, bench_snapshots);
criterion_main!(benches);
