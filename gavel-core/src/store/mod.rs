//! Entity store port
//!
//! The engine treats durable storage as an external collaborator behind this
//! trait: reads return snapshots, and the two commit calls apply a resolved
//! lot's outcome atomically from the engine's point of view (the coordinator
//! is the only writer, serialized behind its lock).

pub mod memory;

pub use memory::MemoryStore;

use crate::core::{AuctionError, Bidder, BidderId, Item, ItemId};
use crate::resolution::NoSale;
use rust_decimal::Decimal;

/// Durable records for items and bidders
pub trait EntityStore: Send + Sync {
    fn get_item(&self, id: &ItemId) -> Option<Item>;

    fn list_items(&self) -> Vec<Item>;

    fn get_bidder(&self, id: &BidderId) -> Option<Bidder>;

    fn list_bidders(&self) -> Vec<Bidder>;

    /// Mark the item Sold at `price` to `bidder` and debit the ledger
    fn commit_sale(
        &self,
        item: &ItemId,
        bidder: &BidderId,
        price: Decimal,
    ) -> Result<(), AuctionError>;

    /// Apply a no-sale disposition (requeue, downgrade, withdraw, retain)
    fn commit_no_sale(&self, item: &ItemId, outcome: &NoSale) -> Result<(), AuctionError>;

    /// Restore every item and bidder to its pool-load state
    fn reset_all(&self) -> Result<(), AuctionError>;
}
