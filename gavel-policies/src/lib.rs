//! Gavel Policies - pluggable squad-completion rule sets
//!
//! Two rule-set versions exist in the wild for the same tournament format,
//! differing in how the mandatory-squad reserve is costed and where the
//! end-of-tier purse floor sits. Both are implemented against
//! [`gavel_core::rules::RulePolicy`] so an operator picks one at engine
//! construction:
//!
//! ### [`PerTierPolicy`] (stock rules)
//!
//! Each tier carries its own minimum (1×A, 3×B, 4×C); missing slots are
//! costed at their tier's base price, the rest of the way to the minimum
//! squad at the cheapest tier's. Floor: 20,000 once the mid tier runs dry
//! and the squad has reached 6.
//!
//! ### [`CombinedPolicy`]
//!
//! Upper tiers are pooled: 4 items across A+B (any mix), 4×C. Pooled slots
//! are costed at the mid tier's base price. Floor: 25,000 under the same
//! depletion trigger.
//!
//! Both are zero-state value types; construction is `Default`.

pub mod combined;
pub mod per_tier;

#[cfg(test)]
mod policy_proptest;

pub use combined::CombinedPolicy;
pub use per_tier::PerTierPolicy;
