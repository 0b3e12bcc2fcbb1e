//! Default auction parameters
//!
//! These are the stock tournament rules. Everything here can be overridden
//! at runtime through [`AuctionConfig`](super::AuctionConfig); the constants
//! exist so tests and binaries agree on one set of defaults.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===== BASE PRICES =====

pub const BASE_PRICE_A: Decimal = dec!(15_000);
pub const BASE_PRICE_B: Decimal = dec!(8_000);
pub const BASE_PRICE_C: Decimal = dec!(5_000);

// ===== BUDGETS & SQUAD SHAPE =====

/// Starting purse per bidder unless the pool file says otherwise
pub const DEFAULT_BUDGET: Decimal = dec!(130_000);

/// Minimum legal squad size every bidder must be able to reach
pub const MIN_SQUAD_SIZE: u32 = 10;

/// Hard ceiling on cumulative category-A spend per bidder
pub const CAT_A_MAX_SPEND: Decimal = dec!(60_000);

/// Per-tier minimums (per-tier rule set)
pub const MIN_CAT_A: u32 = 1;
pub const MIN_CAT_B: u32 = 3;
pub const MIN_CAT_C: u32 = 4;

/// Combined A+B minimum (combined rule set)
pub const MIN_CAT_AB_COMBINED: u32 = 4;

// ===== DYNAMIC BID INCREMENTS =====

/// Category A steps: 1,000 below the threshold, 2,000 at or above
pub const STEP_THRESHOLD_A: Decimal = dec!(20_000);
pub const STEP_SMALL_A: Decimal = dec!(1_000);
pub const STEP_LARGE_A: Decimal = dec!(2_000);

/// Categories B/C steps: 500 below the threshold, 1,000 at or above
pub const STEP_THRESHOLD_LOWER: Decimal = dec!(10_000);
pub const STEP_SMALL_LOWER: Decimal = dec!(500);
pub const STEP_LARGE_LOWER: Decimal = dec!(1_000);

// ===== END-OF-TIER FLOOR =====

/// Squad size at which the depleted-mid-tier budget floor starts to apply
pub const FLOOR_SQUAD_THRESHOLD: u32 = 6;

/// Post-bid budget floor, per-tier rule set
pub const END_TIER_FLOOR: Decimal = dec!(20_000);

/// Post-bid budget floor, combined rule set
pub const END_TIER_FLOOR_COMBINED: Decimal = dec!(25_000);
