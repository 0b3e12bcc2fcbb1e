//! The rule engine: pure, side-effect-free bid admissibility checks
//!
//! Split the way the risk layer splits elsewhere in the workspace:
//! - [`types`]: rejection reasons and squad tallies
//! - [`policy`]: the pluggable rule-set seam (two observed variants)
//! - [`admission`]: the ordered checks themselves

pub mod admission;
pub mod policy;
pub mod types;

pub use admission::BidValidator;
pub use policy::RulePolicy;
pub use types::{RuleViolation, SquadCounts};
