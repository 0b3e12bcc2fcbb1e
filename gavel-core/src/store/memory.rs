//! In-memory entity store
//!
//! Backing maps are concurrent so status queries can read while the
//! coordinator writes; multi-entity consistency comes from the coordinator
//! being the only writer. The pristine pool-load snapshot is retained so
//! `reset_all` can undo downgrades and restore budgets exactly.

use crate::core::{AuctionError, Bidder, BidderId, Item, ItemId, ItemStatus};
use crate::resolution::NoSale;
use crate::rules::RuleViolation;
use crate::store::EntityStore;
use dashmap::DashMap;
use rust_decimal::Decimal;

pub struct MemoryStore {
    items: DashMap<ItemId, Item>,
    bidders: DashMap<BidderId, Bidder>,
    /// Pool-load state, never mutated after `load`
    pristine_items: Vec<Item>,
    pristine_bidders: Vec<Bidder>,
}

impl MemoryStore {
    /// Build a store from the initial pool
    pub fn load(items: Vec<Item>, bidders: Vec<Bidder>) -> Self {
        let store = Self {
            items: DashMap::new(),
            bidders: DashMap::new(),
            pristine_items: items.clone(),
            pristine_bidders: bidders.clone(),
        };
        for item in items {
            store.items.insert(item.id.clone(), item);
        }
        for bidder in bidders {
            store.bidders.insert(bidder.id.clone(), bidder);
        }
        store
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn bidder_count(&self) -> usize {
        self.bidders.len()
    }
}

impl EntityStore for MemoryStore {
    fn get_item(&self, id: &ItemId) -> Option<Item> {
        self.items.get(id).map(|i| i.clone())
    }

    fn list_items(&self) -> Vec<Item> {
        let mut items: Vec<Item> = self.items.iter().map(|i| i.clone()).collect();
        items.sort_by(|a, b| (a.category, &a.name).cmp(&(b.category, &b.name)));
        items
    }

    fn get_bidder(&self, id: &BidderId) -> Option<Bidder> {
        self.bidders.get(id).map(|b| b.clone())
    }

    fn list_bidders(&self) -> Vec<Bidder> {
        let mut bidders: Vec<Bidder> = self.bidders.iter().map(|b| b.clone()).collect();
        bidders.sort_by(|a, b| a.name.cmp(&b.name));
        bidders
    }

    fn commit_sale(
        &self,
        item_id: &ItemId,
        bidder_id: &BidderId,
        price: Decimal,
    ) -> Result<(), AuctionError> {
        let mut bidder = self
            .bidders
            .get_mut(bidder_id)
            .ok_or_else(|| AuctionError::BidderNotFound(bidder_id.clone()))?;
        let mut item = self
            .items
            .get_mut(item_id)
            .ok_or_else(|| AuctionError::ItemNotFound(item_id.clone()))?;

        // The validator has already passed solvency; this guard keeps the
        // ledger invariant independent of callers
        if price > bidder.remaining_budget {
            return Err(AuctionError::RuleViolation(RuleViolation::Insolvent {
                bid: price,
                remaining: bidder.remaining_budget,
            }));
        }

        item.status = ItemStatus::Sold;
        item.sold_price = Some(price);
        item.winner = Some(bidder_id.clone());
        bidder.remaining_budget -= price;

        Ok(())
    }

    fn commit_no_sale(&self, item_id: &ItemId, outcome: &NoSale) -> Result<(), AuctionError> {
        let mut item = self
            .items
            .get_mut(item_id)
            .ok_or_else(|| AuctionError::ItemNotFound(item_id.clone()))?;

        item.status = outcome.status;
        item.round = outcome.round;
        if let Some(category) = outcome.category {
            item.category = category;
        }
        if let Some(base_price) = outcome.base_price {
            item.base_price = base_price;
        }

        Ok(())
    }

    fn reset_all(&self) -> Result<(), AuctionError> {
        self.items.clear();
        self.bidders.clear();
        for item in &self.pristine_items {
            self.items.insert(item.id.clone(), item.clone());
        }
        for bidder in &self.pristine_bidders {
            self.bidders.insert(bidder.id.clone(), bidder.clone());
        }
        Ok(())
    }
}
