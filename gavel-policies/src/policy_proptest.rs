//! Property tests shared by both rule-set variants

use crate::{CombinedPolicy, PerTierPolicy};
use gavel_core::config::BasePrices;
use gavel_core::rules::{RulePolicy, SquadCounts};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn check_reserve_bounds<P: RulePolicy>(policy: &P, after: SquadCounts, open_slots: u32) {
    let prices = BasePrices::default();
    let reserve = policy.min_reserve(after, open_slots, &prices);

    // Never negative, never more than pricing every open slot at the most
    // expensive tier
    assert!(reserve >= Decimal::ZERO);
    assert!(reserve <= Decimal::from(open_slots) * prices.a);

    // At least every open slot at the cheapest tier
    assert!(reserve >= Decimal::from(open_slots) * prices.cheapest());
}

proptest! {
    /// The reserve stays within the trivial price bounds for any squad
    #[test]
    fn prop_reserve_within_bounds(a in 0u32..6, b in 0u32..8, c in 0u32..10) {
        let after = SquadCounts { a, b, c };
        let open_slots = 10u32.saturating_sub(after.total());
        check_reserve_bounds(&PerTierPolicy::default(), after, open_slots);
        check_reserve_bounds(&CombinedPolicy::default(), after, open_slots);
    }

    /// Winning an item never increases what must be held back afterwards
    #[test]
    fn prop_reserve_monotone_in_wins(a in 0u32..3, b in 0u32..4, c in 0u32..5) {
        let prices = BasePrices::default();
        let before = SquadCounts { a, b, c };
        let open_before = 10u32.saturating_sub(before.total());

        for policy in [
            &PerTierPolicy::default() as &dyn RulePolicy,
            &CombinedPolicy::default() as &dyn RulePolicy,
        ] {
            let base = policy.min_reserve(before, open_before, &prices);
            for category in [
                gavel_core::core::Category::A,
                gavel_core::core::Category::B,
                gavel_core::core::Category::C,
            ] {
                let after = before.with_win(category);
                let open_after = 10u32.saturating_sub(after.total());
                let next = policy.min_reserve(after, open_after, &prices);
                prop_assert!(next <= base);
            }
        }
    }
}
