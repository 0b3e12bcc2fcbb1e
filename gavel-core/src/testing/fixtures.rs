//! Builders for test entities and pools

use crate::core::{Bidder, BidderId, Category, Item, ItemId, ItemStatus};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// An Available item at the tier's stock base price
pub fn test_item(id: &str, category: Category) -> Item {
    let base = match category {
        Category::A => dec!(15_000),
        Category::B => dec!(8_000),
        Category::C => dec!(5_000),
    };
    Item::new(ItemId::from(id), id, category, base)
}

/// An item already sold to `winner` at `price`
pub fn sold_item(id: &str, category: Category, winner: &str, price: Decimal) -> Item {
    let mut item = test_item(id, category);
    item.status = ItemStatus::Sold;
    item.sold_price = Some(price);
    item.winner = Some(BidderId::from(winner));
    item
}

/// A bidder with an arbitrary remaining purse
pub fn bidder_with_budget(id: &str, remaining: Decimal) -> Bidder {
    let mut bidder = Bidder::new(BidderId::from(id), id, dec!(130_000));
    bidder.remaining_budget = remaining;
    bidder
}

/// Three full-budget bidders: t1, t2, t3
pub fn standard_bidders() -> Vec<Bidder> {
    ["t1", "t2", "t3"]
        .iter()
        .map(|id| Bidder::new(BidderId::from(*id), *id, dec!(130_000)))
        .collect()
}

/// A pool with ids a0.., b0.., c0.., all Available at stock base prices
pub fn balanced_pool(a: usize, b: usize, c: usize) -> Vec<Item> {
    let mut items = Vec::with_capacity(a + b + c);
    for i in 0..a {
        items.push(test_item(&format!("a{}", i), Category::A));
    }
    for i in 0..b {
        items.push(test_item(&format!("b{}", i), Category::B));
    }
    for i in 0..c {
        items.push(test_item(&format!("c{}", i), Category::C));
    }
    items
}
