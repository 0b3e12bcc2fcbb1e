//! Rule-set policy seam
//!
//! Two diverging rule-set versions exist for squad-completion reserves and
//! the end-of-tier floor. Rather than bless one silently, the validator is
//! generic over this trait and the two variants live in `gavel-policies`
//! (see `PerTierPolicy` and `CombinedPolicy`).

use crate::config::BasePrices;
use crate::rules::SquadCounts;
use rust_decimal::Decimal;

/// One version of the squad-completion rule set
///
/// Implementations are pure: same inputs, same answer, no shared state.
pub trait RulePolicy: Send + Sync {
    /// Cheapest cost of the slots a bidder must still fill to reach the
    /// minimum legal squad, given its composition *after* a hypothetical
    /// win. `open_slots` is how many squad slots remain open after that
    /// win; requirement-specific slots are costed at their tier's base
    /// price, the remainder at the cheapest tier's base price.
    fn min_reserve(&self, after: SquadCounts, open_slots: u32, prices: &BasePrices) -> Decimal;

    /// Post-bid budget floor applied once the mid tier is nearly exhausted
    fn end_tier_floor(&self) -> Decimal;

    /// Squad size (including the hypothetical win) at which the floor
    /// starts to apply
    fn floor_squad_threshold(&self) -> u32;

    /// Policy name for logging
    fn name(&self) -> &'static str;
}
