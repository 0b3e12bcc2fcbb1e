//! Gavel Core - live auction engine
//!
//! A serialized state machine for running a live multi-round auction: one
//! lot on the block at a time, bids and matches validated by a budget rule
//! engine, ties broken by lottery, unsold items requeued, downgraded or
//! withdrawn by a resolution policy.
//!
//! ## Architecture
//! - **Single writer**: every state transition runs through one coordinator
//!   lock, so admissibility checks and commits are atomic
//! - **Ports at the seams**: storage ([`store::EntityStore`]), broadcast
//!   ([`notify::Notifier`]) and the rule-set variant ([`rules::RulePolicy`])
//!   are traits; the engine is generic over all three
//! - **Exact money**: all prices and budgets are `rust_decimal::Decimal`
//! - **Fresh snapshots**: the rule engine re-reads entities on every
//!   attempt, nothing is cached across operations
//!
//! ## Core Modules
//! - `core`: entity types, lot state, error taxonomy
//! - `config`: tunables, base prices, increment schedule, pool loading
//! - `rules`: the four-rule bid admissibility engine
//! - `resolution`: no-sale dispositions (requeue, downgrade, withdraw)
//! - `engine`: the coordinator and its single-writer worker thread
//! - `store`: entity persistence port and the in-memory store
//! - `notify`: committed-transition broadcast port

pub mod config;
pub mod core;
pub mod engine;
pub mod notify;
pub mod resolution;
pub mod rules;
pub mod store;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use crate::core::{
    AuctionError, Bidder, BidderId, Category, Item, ItemId, ItemStatus, Lot, LotState,
};
pub use config::AuctionConfig;
pub use engine::{AuctionHandle, AuctionStats, AuctionWorker, Coordinator, LotClose};
pub use notify::{AuctionEvent, Notifier};
pub use rules::{BidValidator, RulePolicy, RuleViolation};
pub use store::{EntityStore, MemoryStore};

pub use anyhow::{Error, Result};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::AuctionConfig;
    pub use crate::core::{
        AuctionError, Bidder, BidderId, Category, Item, ItemId, ItemStatus, LotState,
    };
    pub use crate::engine::{
        AuctionHandle, AuctionStats, AuctionWorker, Coordinator, CurrentLot, FullState,
        LotClose,
    };
    pub use crate::notify::{AuctionEvent, Notifier};
    pub use crate::rules::{RulePolicy, RuleViolation};
    pub use crate::store::{EntityStore, MemoryStore};
    pub use crate::{Error, Result};
}
