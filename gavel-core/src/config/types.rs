use crate::config::constants::*;
use crate::core::Category;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Runtime auction parameters
///
/// Defaults reproduce the stock tournament rules from
/// [`constants`](super::constants); a JSON config can override any subset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuctionConfig {
    #[serde(default)]
    pub base_prices: BasePrices,

    /// Starting purse for bidders the pool file gives no budget for
    #[serde(default = "default_budget")]
    pub default_budget: Decimal,

    /// Minimum legal squad size
    #[serde(default = "default_min_squad_size")]
    pub min_squad_size: u32,

    /// Cumulative category-A spend ceiling per bidder
    #[serde(default = "default_tier_cap")]
    pub tier_a_spend_cap: Decimal,

    #[serde(default)]
    pub increments: IncrementSchedule,

    /// Which of the two observed rule sets to enforce
    #[serde(default)]
    pub policy: PolicyChoice,
}

impl Default for AuctionConfig {
    fn default() -> Self {
        Self {
            base_prices: BasePrices::default(),
            default_budget: default_budget(),
            min_squad_size: default_min_squad_size(),
            tier_a_spend_cap: default_tier_cap(),
            increments: IncrementSchedule::default(),
            policy: PolicyChoice::default(),
        }
    }
}

fn default_budget() -> Decimal {
    DEFAULT_BUDGET
}

fn default_min_squad_size() -> u32 {
    MIN_SQUAD_SIZE
}

fn default_tier_cap() -> Decimal {
    CAT_A_MAX_SPEND
}

/// Base price per tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BasePrices {
    pub a: Decimal,
    pub b: Decimal,
    pub c: Decimal,
}

impl Default for BasePrices {
    fn default() -> Self {
        Self {
            a: BASE_PRICE_A,
            b: BASE_PRICE_B,
            c: BASE_PRICE_C,
        }
    }
}

impl BasePrices {
    pub fn price(&self, category: Category) -> Decimal {
        match category {
            Category::A => self.a,
            Category::B => self.b,
            Category::C => self.c,
        }
    }

    /// Base price of the cheapest tier (used to cost generic squad slots)
    pub fn cheapest(&self) -> Decimal {
        self.c.min(self.b).min(self.a)
    }
}

/// Dynamic bid increment schedule
///
/// The step size depends on the item's tier and on whether the current price
/// has crossed the tier's threshold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IncrementSchedule {
    pub a_threshold: Decimal,
    pub a_small: Decimal,
    pub a_large: Decimal,
    pub lower_threshold: Decimal,
    pub lower_small: Decimal,
    pub lower_large: Decimal,
}

impl Default for IncrementSchedule {
    fn default() -> Self {
        Self {
            a_threshold: STEP_THRESHOLD_A,
            a_small: STEP_SMALL_A,
            a_large: STEP_LARGE_A,
            lower_threshold: STEP_THRESHOLD_LOWER,
            lower_small: STEP_SMALL_LOWER,
            lower_large: STEP_LARGE_LOWER,
        }
    }
}

impl IncrementSchedule {
    /// Minimum legal increment over `current_price` for an item of `category`
    pub fn step(&self, category: Category, current_price: Decimal) -> Decimal {
        match category {
            Category::A => {
                if current_price < self.a_threshold {
                    self.a_small
                } else {
                    self.a_large
                }
            }
            Category::B | Category::C => {
                if current_price < self.lower_threshold {
                    self.lower_small
                } else {
                    self.lower_large
                }
            }
        }
    }
}

/// Which rule-set variant the validator enforces
///
/// The source system carried two diverging versions; both survive here as
/// pluggable policies (see `gavel-policies`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyChoice {
    /// Independent per-tier minimums, 20,000 end-of-tier floor
    #[default]
    PerTier,
    /// Combined A+B minimum, 25,000 end-of-tier floor
    Combined,
}
