//! Core domain types for the auction engine
//!
//! - `ItemId` / `BidderId`: string-backed identifiers
//! - `Category`: closed tier enum with exhaustive dispatch
//! - `Item` / `Bidder`: the entities the store persists
//! - `Lot` / `LotState`: the singleton current-auction state
//! - `AuctionError`: the rejection taxonomy

pub mod errors;
pub mod lot;
pub mod types;

pub use errors::AuctionError;
pub use lot::{Lot, LotState};
pub use types::{Bidder, BidderId, Category, Item, ItemId, ItemStatus};
