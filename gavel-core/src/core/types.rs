//! Core domain types for the auction engine
//!
//! Entities mirror what the entity store persists:
//! - `Item`: an auctionable unit with a value tier, a round counter and a
//!   lifecycle status
//! - `Bidder`: a buying party with a fixed initial budget and a ledger that
//!   only ever decreases
//! - `Category`: the closed set of value tiers, with tier-specific increment
//!   and downgrade behavior resolved by exhaustive match (no string tags)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an item in the pool
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Unique identifier for a bidder
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BidderId(pub String);

impl BidderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for BidderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BidderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Value tier of an item, ordered by value (A highest)
///
/// The tier drives the base price, the dynamic bid increment, the
/// category-A spend ceiling and the no-sale downgrade path. All of that
/// dispatch is an exhaustive match on this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    A,
    B,
    C,
}

impl Category {
    /// The next tier down, if any (used by the no-sale downgrade path)
    pub const fn next_lower(self) -> Option<Category> {
        match self {
            Category::A => Some(Category::B),
            Category::B => Some(Category::C),
            Category::C => None,
        }
    }

    /// Whether this is the lowest tier (terminal for repeated no-sales)
    pub const fn is_lowest(self) -> bool {
        matches!(self, Category::C)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::A => write!(f, "A"),
            Category::B => write!(f, "B"),
            Category::C => write!(f, "C"),
        }
    }
}

/// Lifecycle status of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemStatus {
    /// In the pool, can be put up for bid
    Available,
    /// Won by a bidder; carries a price and a winner
    Sold,
    /// Permanently removed after repeated no-sales in the lowest tier
    Withdrawn,
}

/// An auctionable unit
///
/// Invariants (enforced by the resolution policy, the only writer):
/// - `Sold` items always carry both `sold_price` and `winner`
/// - `Available`/`Withdrawn` items carry neither
/// - `original_category` never changes after pool load, so a full reset can
///   undo an in-auction downgrade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub category: Category,
    /// Tier assigned at pool load; retained across downgrades
    pub original_category: Category,
    pub base_price: Decimal,
    /// Offering pass, starts at 1 and advances on a failed sale
    pub round: u8,
    pub status: ItemStatus,
    pub sold_price: Option<Decimal>,
    pub winner: Option<BidderId>,
}

impl Item {
    /// Create a fresh item at round 1
    pub fn new(id: ItemId, name: impl Into<String>, category: Category, base_price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            original_category: category,
            base_price,
            round: 1,
            status: ItemStatus::Available,
            sold_price: None,
            winner: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == ItemStatus::Available
    }

    /// Check the sold/available field coupling
    pub fn invariants_hold(&self) -> bool {
        match self.status {
            ItemStatus::Sold => self.sold_price.is_some() && self.winner.is_some(),
            ItemStatus::Available | ItemStatus::Withdrawn => {
                self.sold_price.is_none() && self.winner.is_none()
            }
        }
    }
}

/// A buying party with a finite budget
///
/// The squad (set of items won) is derived from `Item::winner`, never stored
/// here. `remaining` only moves down, via ledger debits on a win.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bidder {
    pub id: BidderId,
    pub name: String,
    pub initial_budget: Decimal,
    pub remaining_budget: Decimal,
}

impl Bidder {
    pub fn new(id: BidderId, name: impl Into<String>, budget: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            initial_budget: budget,
            remaining_budget: budget,
        }
    }

    /// remaining ∈ [0, initial]
    pub fn invariants_hold(&self) -> bool {
        self.remaining_budget >= Decimal::ZERO && self.remaining_budget <= self.initial_budget
    }
}
