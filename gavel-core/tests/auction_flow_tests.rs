//! End-to-end auction runs through the public API
//!
//! Drives whole tournaments and checks the ledger-level invariants that
//! unit tests can't see: money conservation, terminal pool states, and
//! reproducibility of seeded runs.

use gavel_core::config::AuctionConfig;
use gavel_core::core::{Bidder, BidderId, Category, Item, ItemId, ItemStatus};
use gavel_core::engine::{Coordinator, FullState, LotClose};
use gavel_core::notify::NullNotifier;
use gavel_core::store::MemoryStore;
use gavel_policies::PerTierPolicy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn pool() -> (Vec<Item>, Vec<Bidder>) {
    let mut items = Vec::new();
    for (prefix, category, base, count) in [
        ("a", Category::A, dec!(15_000), 4),
        ("b", Category::B, dec!(8_000), 10),
        ("c", Category::C, dec!(5_000), 14),
    ] {
        for i in 0..count {
            items.push(Item::new(
                ItemId::from(format!("{}{}", prefix, i).as_str()),
                format!("{}-{}", prefix.to_uppercase(), i),
                category,
                base,
            ));
        }
    }
    let bidders = (1..=4)
        .map(|i| {
            Bidder::new(
                BidderId::from(format!("t{}", i).as_str()),
                format!("Team {}", i),
                dec!(130_000),
            )
        })
        .collect();
    (items, bidders)
}

fn engine(seed: u64) -> Coordinator<MemoryStore, NullNotifier, PerTierPolicy> {
    let (items, bidders) = pool();
    Coordinator::with_seed(
        MemoryStore::load(items, bidders),
        NullNotifier,
        PerTierPolicy::default(),
        AuctionConfig::default(),
        seed,
    )
}

/// Auction every available item until the pool drains: the wealthiest
/// bidders contest each lot, ties go to lottery
fn run_tournament(engine: &Coordinator<MemoryStore, NullNotifier, PerTierPolicy>) -> FullState {
    let mut safety = 0;
    loop {
        let full = engine.full_state();
        let Some(item) = full.items.iter().find(|i| i.is_available()).cloned() else {
            return full;
        };
        safety += 1;
        assert!(safety < 500, "pool failed to drain");

        engine.start(&item.id).unwrap();

        let mut contenders = full.bidders.clone();
        contenders.sort_by(|a, b| b.remaining_budget.cmp(&a.remaining_budget));

        let mut joined = 0;
        for bidder in contenders.iter().take(3) {
            let outcome = if joined == 0 {
                engine.place_bid(&bidder.id, None)
            } else {
                engine.match_bid(&bidder.id)
            };
            if outcome.is_ok() {
                joined += 1;
            }
        }
        if joined >= 2 {
            engine.run_lottery().unwrap();
        }
        engine.close(false).unwrap();
    }
}

#[test]
fn test_tournament_conserves_money() {
    let engine = engine(11);
    let full = run_tournament(&engine);

    for bidder in &full.bidders {
        let spent: Decimal = full
            .items
            .iter()
            .filter(|i| i.winner.as_ref() == Some(&bidder.id))
            .filter_map(|i| i.sold_price)
            .sum();
        assert_eq!(
            bidder.initial_budget - bidder.remaining_budget,
            spent,
            "ledger drift for {}",
            bidder.id
        );
        assert!(bidder.remaining_budget >= Decimal::ZERO);
    }
}

#[test]
fn test_tournament_reaches_terminal_pool() {
    let engine = engine(11);
    let full = run_tournament(&engine);

    for item in &full.items {
        match item.status {
            ItemStatus::Sold => {
                assert!(item.winner.is_some());
                assert!(item.sold_price.is_some());
            }
            ItemStatus::Withdrawn => {
                // Only the lowest tier is ever withdrawn
                assert_eq!(item.category, Category::C);
                assert_eq!(item.winner, None);
            }
            ItemStatus::Available => panic!("item {} still available", item.id),
        }
    }
}

#[test]
fn test_tier_cap_holds_across_a_whole_tournament() {
    let engine = engine(23);
    let full = run_tournament(&engine);

    for bidder in &full.bidders {
        let a_spend: Decimal = full
            .items
            .iter()
            .filter(|i| i.category == Category::A && i.winner.as_ref() == Some(&bidder.id))
            .filter_map(|i| i.sold_price)
            .sum();
        assert!(
            a_spend <= dec!(60_000),
            "{} spent {} on category A",
            bidder.id,
            a_spend
        );
    }
}

#[test]
fn test_seeded_runs_are_identical() {
    let first = run_tournament(&engine(42));
    let second = run_tournament(&engine(42));

    assert_eq!(first.items, second.items);
    assert_eq!(first.bidders, second.bidders);
}

#[test]
fn test_different_seeds_may_diverge_but_stay_legal() {
    // Not asserting divergence (seeds can collide); both runs must satisfy
    // the ledger invariants regardless
    for seed in [1u64, 2, 3] {
        let full = run_tournament(&engine(seed));
        let total_spent: Decimal = full.items.iter().filter_map(|i| i.sold_price).sum();
        let total_debited: Decimal = full
            .bidders
            .iter()
            .map(|b| b.initial_budget - b.remaining_budget)
            .sum();
        assert_eq!(total_spent, total_debited);
    }
}

#[test]
fn test_unsold_item_cycles_to_withdrawal() {
    let (items, _) = pool();
    // One penniless bidder: nothing can ever sell
    let bidders = vec![Bidder::new(BidderId::from("t1"), "Broke", dec!(0))];
    let engine = Coordinator::with_seed(
        MemoryStore::load(items, bidders),
        NullNotifier,
        PerTierPolicy::default(),
        AuctionConfig::default(),
        7,
    );

    // a0: round 1 requeue, round 2 downgrade to B, then requeue, retained
    // forever at round 2 as a B item
    engine.start(&ItemId::from("a0")).unwrap();
    engine.close(false).unwrap();
    engine.start(&ItemId::from("a0")).unwrap();
    let LotClose::NoSale { item, .. } = engine.close(false).unwrap() else {
        panic!("expected no-sale");
    };
    assert_eq!(item.category, Category::B);

    // c0: requeue then withdraw
    engine.start(&ItemId::from("c0")).unwrap();
    engine.close(false).unwrap();
    engine.start(&ItemId::from("c0")).unwrap();
    let LotClose::NoSale { item, .. } = engine.close(false).unwrap() else {
        panic!("expected no-sale");
    };
    assert_eq!(item.status, ItemStatus::Withdrawn);

    // A withdrawn item cannot come back on the block
    assert!(engine.start(&ItemId::from("c0")).is_err());
}

#[test]
fn test_reset_all_supports_rerunning_the_tournament() {
    let engine = engine(99);
    let first = run_tournament(&engine);
    engine.reset_all().unwrap();
    let second = run_tournament(&engine);

    // Same seed state has advanced, but the rerun starts from pristine
    // entities, so ledger conservation holds independently
    assert_eq!(first.items.len(), second.items.len());
    for bidder in &second.bidders {
        let spent: Decimal = second
            .items
            .iter()
            .filter(|i| i.winner.as_ref() == Some(&bidder.id))
            .filter_map(|i| i.sold_price)
            .sum();
        assert_eq!(bidder.initial_budget - bidder.remaining_budget, spent);
    }
}
