//! Auction configuration
//!
//! Compile-time defaults live in [`constants`]; [`AuctionConfig`] is the
//! runtime view with serde overrides; [`pool`] loads the item/bidder pool.

pub mod constants;
pub mod pool;
pub mod types;

pub use pool::{PoolBidder, PoolFile, PoolItem};
pub use types::{AuctionConfig, BasePrices, IncrementSchedule, PolicyChoice};

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

impl AuctionConfig {
    /// Load configuration from a JSON file; absent fields keep their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {:?}", path))?;
        let config: AuctionConfig =
            serde_json::from_str(&raw).with_context(|| format!("invalid config file {:?}", path))?;
        Ok(config)
    }
}
