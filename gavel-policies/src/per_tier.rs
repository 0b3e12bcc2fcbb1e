//! Stock rule set: independent per-tier squad minimums

use gavel_core::config::constants::{
    END_TIER_FLOOR, FLOOR_SQUAD_THRESHOLD, MIN_CAT_A, MIN_CAT_B, MIN_CAT_C,
};
use gavel_core::config::BasePrices;
use gavel_core::rules::{RulePolicy, SquadCounts};
use rust_decimal::Decimal;

/// Per-tier minimums with a 20,000 end-of-tier floor
///
/// The mandatory squad is 1×A, 3×B, 4×C plus enough items of any tier to
/// reach the overall minimum. Reserve costing: each missing tier-specific
/// slot at its tier's base price, each remaining generic slot at the
/// cheapest tier's.
#[derive(Debug, Clone, Copy)]
pub struct PerTierPolicy {
    pub min_a: u32,
    pub min_b: u32,
    pub min_c: u32,
    pub floor: Decimal,
    pub floor_threshold: u32,
}

impl Default for PerTierPolicy {
    fn default() -> Self {
        Self {
            min_a: MIN_CAT_A,
            min_b: MIN_CAT_B,
            min_c: MIN_CAT_C,
            floor: END_TIER_FLOOR,
            floor_threshold: FLOOR_SQUAD_THRESHOLD,
        }
    }
}

impl RulePolicy for PerTierPolicy {
    fn min_reserve(&self, after: SquadCounts, open_slots: u32, prices: &BasePrices) -> Decimal {
        let needs_a = self.min_a.saturating_sub(after.a);
        let needs_b = self.min_b.saturating_sub(after.b);
        let needs_c = self.min_c.saturating_sub(after.c);
        let generic = open_slots.saturating_sub(needs_a + needs_b + needs_c);

        Decimal::from(needs_a) * prices.a
            + Decimal::from(needs_b) * prices.b
            + Decimal::from(needs_c) * prices.c
            + Decimal::from(generic) * prices.cheapest()
    }

    fn end_tier_floor(&self) -> Decimal {
        self.floor
    }

    fn floor_squad_threshold(&self) -> u32 {
        self.floor_threshold
    }

    fn name(&self) -> &'static str {
        "per-tier"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn prices() -> BasePrices {
        BasePrices::default()
    }

    #[test]
    fn test_empty_squad_reserves_full_minimum() {
        // 1×A + 3×B + 4×C + 2 generic = 15,000 + 24,000 + 20,000 + 10,000
        let reserve =
            PerTierPolicy::default().min_reserve(SquadCounts::default(), 10, &prices());
        assert_eq!(reserve, dec!(69_000));
    }

    #[test]
    fn test_tier_minimums_fall_away_as_won() {
        // After one A win: 3×B + 4×C + 2 generic
        let after = SquadCounts { a: 1, b: 0, c: 0 };
        let reserve = PerTierPolicy::default().min_reserve(after, 9, &prices());
        assert_eq!(reserve, dec!(54_000));
    }

    #[test]
    fn test_surplus_in_one_tier_does_not_offset_another() {
        // Three A wins still leave the B and C minimums fully owed
        let after = SquadCounts { a: 3, b: 0, c: 0 };
        let reserve = PerTierPolicy::default().min_reserve(after, 7, &prices());
        assert_eq!(reserve, dec!(44_000));
    }

    #[test]
    fn test_only_generic_slots_remain() {
        let after = SquadCounts { a: 1, b: 3, c: 4 };
        let reserve = PerTierPolicy::default().min_reserve(after, 2, &prices());
        assert_eq!(reserve, dec!(10_000));
    }
}
