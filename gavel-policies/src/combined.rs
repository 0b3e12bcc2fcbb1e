//! Alternate rule set: pooled upper-tier squad minimum

use gavel_core::config::constants::{
    END_TIER_FLOOR_COMBINED, FLOOR_SQUAD_THRESHOLD, MIN_CAT_AB_COMBINED, MIN_CAT_C,
};
use gavel_core::config::BasePrices;
use gavel_core::rules::{RulePolicy, SquadCounts};
use rust_decimal::Decimal;

/// Combined A+B minimum with a 25,000 end-of-tier floor
///
/// The upper tiers are pooled: any mix of 4 items across A and B satisfies
/// the upper minimum, plus 4×C. Pooled slots are costed at the mid tier's
/// base price (the cheapest way to fill them), generic slots at the
/// cheapest tier's.
#[derive(Debug, Clone, Copy)]
pub struct CombinedPolicy {
    pub min_ab: u32,
    pub min_c: u32,
    pub floor: Decimal,
    pub floor_threshold: u32,
}

impl Default for CombinedPolicy {
    fn default() -> Self {
        Self {
            min_ab: MIN_CAT_AB_COMBINED,
            min_c: MIN_CAT_C,
            floor: END_TIER_FLOOR_COMBINED,
            floor_threshold: FLOOR_SQUAD_THRESHOLD,
        }
    }
}

impl RulePolicy for CombinedPolicy {
    fn min_reserve(&self, after: SquadCounts, open_slots: u32, prices: &BasePrices) -> Decimal {
        let needs_ab = self.min_ab.saturating_sub(after.a + after.b);
        let needs_c = self.min_c.saturating_sub(after.c);
        let generic = open_slots.saturating_sub(needs_ab + needs_c);

        Decimal::from(needs_ab) * prices.b
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
        "combined"
    }
}
