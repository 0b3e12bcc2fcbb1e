//! Engine: the serialized auction lifecycle and its threading shell

pub mod coordinator;
pub mod worker;

pub use coordinator::{AuctionStats, Coordinator, CurrentLot, FullState, LotClose};
pub use worker::{AuctionHandle, AuctionWorker};
