use crate::core::{BidderId, Category, Item, ItemStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reason the rule engine rejected a bid
///
/// Each variant carries the numbers the caller needs to render an
/// actionable message.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum RuleViolation {
    /// Bid exceeds the bidder's remaining purse
    #[error("insufficient budget: bid {bid} exceeds remaining {remaining}")]
    Insolvent { bid: Decimal, remaining: Decimal },

    /// Cumulative category-A spend would exceed the ceiling
    #[error("category A spend cap exceeded: {spent} spent + {bid} bid > {cap}")]
    TierCapExceeded {
        spent: Decimal,
        bid: Decimal,
        cap: Decimal,
    },

    /// Winning would leave too little to complete the mandatory squad
    #[error("must reserve {required} for remaining squad slots; only {after_bid} would remain")]
    ReserveShortfall {
        required: Decimal,
        after_bid: Decimal,
    },

    /// Depleted mid tier: post-bid budget would fall below the floor
    #[error("end-of-tier floor: {after_bid} would fall below {floor} with a squad of {squad_size}")]
    FloorBreach {
        floor: Decimal,
        after_bid: Decimal,
        squad_size: u32,
    },
}

/// Per-tier composition of a bidder's squad (items already won)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SquadCounts {
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

impl SquadCounts {
    /// Tally the squad a bidder has won so far
    pub fn of(items: &[Item], bidder: &BidderId) -> Self {
        let mut counts = Self::default();
        for item in items {
            if item.status == ItemStatus::Sold && item.winner.as_ref() == Some(bidder) {
                match item.category {
                    Category::A => counts.a += 1,
                    Category::B => counts.b += 1,
                    Category::C => counts.c += 1,
                }
            }
        }
        counts
    }

    pub fn total(&self) -> u32 {
        self.a + self.b + self.c
    }

    /// Counts after a hypothetical win in `category`
    pub fn with_win(mut self, category: Category) -> Self {
        match category {
            Category::A => self.a += 1,
            Category::B => self.b += 1,
            Category::C => self.c += 1,
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Item, ItemId};
    use rust_decimal_macros::dec;

    fn sold_to(id: &str, category: Category, bidder: &str, price: Decimal) -> Item {
        let mut item = Item::new(ItemId::from(id), id, category, price);
        item.status = ItemStatus::Sold;
        item.sold_price = Some(price);
        item.winner = Some(BidderId::from(bidder));
        item
    }

    #[test]
    fn test_squad_counts_only_count_sold_to_bidder() {
        let items = vec![
            sold_to("p1", Category::A, "t1", dec!(15_000)),
            sold_to("p2", Category::B, "t1", dec!(8_000)),
            sold_to("p3", Category::B, "t2", dec!(8_000)),
            Item::new(ItemId::from("p4"), "p4", Category::C, dec!(5_000)),
        ];

        let counts = SquadCounts::of(&items, &BidderId::from("t1"));
        assert_eq!(counts, SquadCounts { a: 1, b: 1, c: 0 });
        assert_eq!(counts.total(), 2);
    }

    #[test]
    fn test_with_win() {
        let counts = SquadCounts { a: 0, b: 2, c: 1 };
        assert_eq!(counts.with_win(Category::C), SquadCounts { a: 0, b: 2, c: 2 });
    }
}
