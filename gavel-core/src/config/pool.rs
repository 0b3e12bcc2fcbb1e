//! Pool file loading
//!
//! A pool file is the JSON list of items and bidders the auction runs over.
//! Items enter the pool Available at round 1 with their category's base
//! price; bidders receive the default budget unless the file gives one.

use crate::config::AuctionConfig;
use crate::core::{Bidder, BidderId, Category, Item, ItemId};
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// On-disk pool description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolFile {
    pub items: Vec<PoolItem>,
    pub bidders: Vec<PoolBidder>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolItem {
    pub id: ItemId,
    pub name: String,
    pub category: Category,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolBidder {
    pub id: BidderId,
    pub name: String,
    /// Starting purse; defaults to `AuctionConfig::default_budget`
    #[serde(default)]
    pub budget: Option<Decimal>,
}

impl PoolFile {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read pool file {:?}", path))?;
        let pool: PoolFile =
            serde_json::from_str(&raw).with_context(|| format!("invalid pool file {:?}", path))?;
        Ok(pool)
    }

    /// Materialize entities at their initial state
    pub fn build(&self, config: &AuctionConfig) -> (Vec<Item>, Vec<Bidder>) {
        let items = self
            .items
            .iter()
            .map(|p| {
                Item::new(
                    p.id.clone(),
                    p.name.clone(),
                    p.category,
                    config.base_prices.price(p.category),
                )
            })
            .collect();

        let bidders = self
            .bidders
            .iter()
            .map(|b| {
                Bidder::new(
                    b.id.clone(),
                    b.name.clone(),
                    b.budget.unwrap_or(config.default_budget),
                )
            })
            .collect();

        (items, bidders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ItemStatus;
    use rust_decimal_macros::dec;

    #[test]
    fn test_build_applies_base_prices_and_budgets() {
        let pool: PoolFile = serde_json::from_str(
            r#"{
                "items": [
                    {"id": "p1", "name": "One", "category": "A"},
                    {"id": "p2", "name": "Two", "category": "C"}
                ],
                "bidders": [
                    {"id": "t1", "name": "Team One"},
                    {"id": "t2", "name": "Team Two", "budget": 90000}
                ]
            }"#,
        )
        .expect("valid pool json");

        let config = AuctionConfig::default();
        let (items, bidders) = pool.build(&config);

        assert_eq!(items[0].base_price, dec!(15_000));
        assert_eq!(items[1].base_price, dec!(5_000));
        assert!(items.iter().all(|i| i.status == ItemStatus::Available && i.round == 1));

        assert_eq!(bidders[0].remaining_budget, dec!(130_000));
        assert_eq!(bidders[1].remaining_budget, dec!(90_000));
        assert_eq!(bidders[1].initial_budget, dec!(90_000));
    }
}
