//! Bid admissibility - the rule engine
//!
//! Pure validation run against a fresh snapshot of all entities before any
//! state mutation. Checks run in order, first failure wins:
//!
//! ```text
//! Bid → Solvency → Tier cap → Quota reserve → End-of-tier floor → OK
//!        ✓ purse     ✓ cat-A     ✓ squad         ✓ depleted
//!          covers      ceiling     completable      mid tier
//! ```
//!
//! The validator never caches: other bidders' wins change the snapshot
//! between calls, so the coordinator re-reads entities and re-runs this on
//! every single bid/match attempt.

use crate::config::AuctionConfig;
use crate::core::{Bidder, Category, Item, ItemStatus};
use crate::rules::{RulePolicy, RuleViolation, SquadCounts};
use rust_decimal::Decimal;
use tracing::debug;

/// Admissibility checker for one rule-set policy
pub struct BidValidator<P: RulePolicy> {
    policy: P,
    config: AuctionConfig,
}

impl<P: RulePolicy> BidValidator<P> {
    pub fn new(policy: P, config: AuctionConfig) -> Self {
        Self { policy, config }
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Evaluate whether `bidder` may take `item` at `bid`
    ///
    /// `all_items` is the snapshot the squad and pool computations run
    /// against; it must include `item` itself (still Available while the
    /// lot is open). No side effects, safe to call concurrently.
    pub fn admissible(
        &self,
        bidder: &Bidder,
        item: &Item,
        bid: Decimal,
        all_items: &[Item],
    ) -> Result<(), RuleViolation> {
        // 1. Solvency
        if bid > bidder.remaining_budget {
            debug!(
                bidder = %bidder.id,
                %bid,
                remaining = %bidder.remaining_budget,
                "rejected: insolvent"
            );
            return Err(RuleViolation::Insolvent {
                bid,
                remaining: bidder.remaining_budget,
            });
        }

        // 2. Category-A spend ceiling
        if item.category == Category::A {
            let spent = tier_spend(all_items, bidder, Category::A);
            if spent + bid > self.config.tier_a_spend_cap {
                debug!(bidder = %bidder.id, %spent, %bid, "rejected: tier cap");
                return Err(RuleViolation::TierCapExceeded {
                    spent,
                    bid,
                    cap: self.config.tier_a_spend_cap,
                });
            }
        }

        let counts = SquadCounts::of(all_items, &bidder.id);
        let after = counts.with_win(item.category);
        let after_bid = bidder.remaining_budget - bid;

        // 3. Quota reservation: winning must not make the mandatory squad
        //    unaffordable
        let open_slots = self.config.min_squad_size.saturating_sub(after.total());
        if open_slots > 0 {
            let required = self
                .policy
                .min_reserve(after, open_slots, &self.config.base_prices);
            if after_bid < required {
                debug!(
                    bidder = %bidder.id,
                    %required,
                    %after_bid,
                    policy = self.policy.name(),
                    "rejected: reserve shortfall"
                );
                return Err(RuleViolation::ReserveShortfall { required, after_bid });
            }
        }

        // 4. End-of-tier floor: once the mid-tier pool is (about to be)
        //    exhausted, a big-enough squad must keep a minimum purse for
        //    the lower tier
        if mid_tier_depleted(all_items, item) {
            let squad_size = after.total();
            if squad_size >= self.policy.floor_squad_threshold()
                && after_bid < self.policy.end_tier_floor()
            {
                debug!(bidder = %bidder.id, %after_bid, squad_size, "rejected: floor breach");
                return Err(RuleViolation::FloorBreach {
                    floor: self.policy.end_tier_floor(),
                    after_bid,
                    squad_size,
                });
            }
        }

        Ok(())
    }
}

/// Sum of prices the bidder has already paid for items of `category`
fn tier_spend(items: &[Item], bidder: &Bidder, category: Category) -> Decimal {
    items
        .iter()
        .filter(|i| {
            i.category == category
                && i.status == ItemStatus::Sold
                && i.winner.as_ref() == Some(&bidder.id)
        })
        .filter_map(|i| i.sold_price)
        .sum()
}

/// Whether the mid-tier pool is exhausted or down to the item on the block
fn mid_tier_depleted(items: &[Item], current: &Item) -> bool {
    let remaining = items
        .iter()
        .filter(|i| i.category == Category::B && i.status == ItemStatus::Available)
        .count();
    remaining == 0 || (remaining == 1 && current.category == Category::B)
}
