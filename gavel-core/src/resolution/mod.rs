//! Resolution policy: what happens to an item when bidding closes
//!
//! With a winner the outcome is a ledger debit plus a Sold mark, committed
//! atomically by the entity store. Without one, disposition depends on the
//! item's round and tier:
//!
//! ```text
//! round 1, no bidder      → stays Available, round 2 (second pass)
//! round 2, no bidder, A   → downgraded to B, base price reset, round 1
//! round 2, no bidder, B   → stays Available at round 2 (offered again)
//! round 2, no bidder, C   → Withdrawn (out of the pool for good)
//! ```
//!
//! All pure functions: the coordinator feeds the outcome to the store.

use crate::config::BasePrices;
use crate::core::{Category, Item, ItemStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What became of an unsold item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Disposition {
    /// First failed pass: offered again in round 2
    Requeued,
    /// Failed twice in an upper tier: re-enters the pool one tier down
    Downgraded { from: Category, to: Category },
    /// Failed twice in the lowest tier: permanently removed
    Withdrawn,
    /// Failed twice in the middle tier: keeps being offered at round 2
    Retained,
}

/// The field updates a no-sale commits to the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoSale {
    pub disposition: Disposition,
    pub status: ItemStatus,
    /// New tier, if the item was downgraded
    pub category: Option<Category>,
    /// New base price, if the item was downgraded
    pub base_price: Option<Decimal>,
    pub round: u8,
}

/// Decide the fate of `item` after a close with no winning bidder
pub fn resolve_no_sale(item: &Item, prices: &BasePrices) -> NoSale {
    if item.round <= 1 {
        return NoSale {
            disposition: Disposition::Requeued,
            status: ItemStatus::Available,
            category: None,
            base_price: None,
            round: 2,
        };
    }

    match item.category.next_lower() {
        // Top tier falls one tier and starts over
        Some(lower) if item.category == Category::A => NoSale {
            disposition: Disposition::Downgraded {
                from: item.category,
                to: lower,
            },
            status: ItemStatus::Available,
            category: Some(lower),
            base_price: Some(prices.price(lower)),
            round: 1,
        },
        // Middle tier keeps circulating at round 2
        Some(_) => NoSale {
            disposition: Disposition::Retained,
            status: ItemStatus::Available,
            category: None,
            base_price: None,
            round: item.round,
        },
        // Lowest tier leaves the pool
        None => NoSale {
            disposition: Disposition::Withdrawn,
            status: ItemStatus::Withdrawn,
            category: None,
            base_price: None,
            round: item.round,
        },
    }
}
