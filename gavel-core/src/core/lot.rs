//! The singleton current-lot state
//!
//! Exactly one lot may be open at any time. The coordinator owns an
//! `Option<Lot>` behind its serialization lock; this module only models the
//! lot itself and its in-lot transitions.
//!
//! ```text
//!     (idle) ──start──→ OPEN ──bid/match/lottery──→ OPEN
//!                        │
//!                        └──close / force-resolve / reset──→ (idle)
//! ```
//!
//! The matching list is ordered: head = current leader. A bid displaces the
//! whole list (lead is exclusive); a match prepends without changing price
//! (most-recent-match leads until a lottery collapses the tie).

use crate::core::types::{BidderId, ItemId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An open lot: the item currently up for bid
#[derive(Debug, Clone, PartialEq)]
pub struct Lot {
    pub item_id: ItemId,
    /// Current price; starts at the item's base price
    pub price: Decimal,
    /// Bidders matching the current price, head = leader
    pub bidders: Vec<BidderId>,
}

impl Lot {
    /// Open a lot at the item's base price with no bidders yet
    pub fn open(item_id: ItemId, base_price: Decimal) -> Self {
        Self {
            item_id,
            price: base_price,
            bidders: Vec::new(),
        }
    }

    pub fn leader(&self) -> Option<&BidderId> {
        self.bidders.first()
    }

    pub fn has_bidders(&self) -> bool {
        !self.bidders.is_empty()
    }

    pub fn is_matching(&self, bidder: &BidderId) -> bool {
        self.bidders.contains(bidder)
    }

    /// A successful bid: the price moves and the bidder becomes the sole
    /// leader, displacing any prior matchers
    pub fn take_lead(&mut self, bidder: BidderId, price: Decimal) {
        self.price = price;
        self.bidders.clear();
        self.bidders.push(bidder);
    }

    /// A successful match: prepend without touching the price
    pub fn match_lead(&mut self, bidder: BidderId) {
        self.bidders.insert(0, bidder);
    }

    /// Lottery outcome: collapse the matching list to the drawn winner
    pub fn collapse_to(&mut self, winner: BidderId) {
        self.bidders.clear();
        self.bidders.push(winner);
    }
}

/// Serializable view of the lot slot, idle or open
///
/// This is what snapshot queries return and what event payloads carry.
/// Invariant: when `active` is false every other field is at its zero/empty
/// value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotState {
    pub active: bool,
    pub item_id: Option<ItemId>,
    pub price: Decimal,
    pub bidders: Vec<BidderId>,
}

impl LotState {
    pub fn idle() -> Self {
        Self {
            active: false,
            item_id: None,
            price: Decimal::ZERO,
            bidders: Vec::new(),
        }
    }

    pub fn from_slot(slot: Option<&Lot>) -> Self {
        match slot {
            Some(lot) => Self {
                active: true,
                item_id: Some(lot.item_id.clone()),
                price: lot.price,
                bidders: lot.bidders.clone(),
            },
            None => Self::idle(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn lot() -> Lot {
        Lot::open(ItemId::from("p1"), dec!(15_000))
    }

    #[test]
    fn test_open_lot_has_no_bidders() {
        let lot = lot();
        assert_eq!(lot.price, dec!(15_000));
        assert!(!lot.has_bidders());
        assert_eq!(lot.leader(), None);
    }

    #[test]
    fn test_bid_displaces_matchers() {
        let mut lot = lot();
        lot.take_lead(BidderId::from("t1"), dec!(15_000));
        lot.match_lead(BidderId::from("t2"));
        lot.match_lead(BidderId::from("t3"));
        assert_eq!(lot.bidders.len(), 3);

        // t4 outbids: everyone else drops off
        lot.take_lead(BidderId::from("t4"), dec!(16_000));
        assert_eq!(lot.bidders, vec![BidderId::from("t4")]);
        assert_eq!(lot.price, dec!(16_000));
    }

    #[test]
    fn test_match_prepends_most_recent_first() {
        let mut lot = lot();
        lot.take_lead(BidderId::from("t1"), dec!(15_000));
        lot.match_lead(BidderId::from("t2"));
        assert_eq!(lot.leader(), Some(&BidderId::from("t2")));
        assert_eq!(lot.price, dec!(15_000));
    }

    #[test]
    fn test_collapse_to_winner() {
        let mut lot = lot();
        lot.take_lead(BidderId::from("t1"), dec!(15_000));
        lot.match_lead(BidderId::from("t2"));
        lot.collapse_to(BidderId::from("t1"));
        assert_eq!(lot.bidders, vec![BidderId::from("t1")]);
    }

    #[test]
    fn test_idle_state_is_zeroed() {
        let state = LotState::from_slot(None);
        assert!(!state.active);
        assert_eq!(state.item_id, None);
        assert_eq!(state.price, Decimal::ZERO);
        assert!(state.bidders.is_empty());
    }
}
