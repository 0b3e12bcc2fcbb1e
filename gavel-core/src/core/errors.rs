//! Rejection taxonomy for auction operations
//!
//! Every variant is an expected, recoverable rejection returned synchronously
//! to the caller. Validation always runs before mutation, so a rejection
//! never leaves partial state behind and never needs rollback.

use crate::core::types::{BidderId, ItemId};
use crate::rules::RuleViolation;
use rust_decimal::Decimal;
use thiserror::Error;

/// Why an auction operation was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuctionError {
    /// Referenced item does not exist in the pool
    #[error("item {0} not found")]
    ItemNotFound(ItemId),

    /// Referenced bidder does not exist
    #[error("bidder {0} not found")]
    BidderNotFound(BidderId),

    /// Operation is illegal in the current lifecycle state
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// The rule engine rejected the bid
    #[error("bid rejected: {0}")]
    RuleViolation(#[from] RuleViolation),

    /// Explicit bid amount below the minimum legal bid
    #[error("bid {offered} below minimum {minimum}")]
    IncrementTooSmall { offered: Decimal, minimum: Decimal },

    /// Lottery with <2 matching bidders, or match with none to match
    #[error("requires at least {required} matching bidder(s), have {actual}")]
    InsufficientBidders { required: usize, actual: usize },

    /// Match requested by a bidder already on the matching list
    #[error("bidder {0} is already matching this lot")]
    DuplicateBidder(BidderId),

    /// The engine worker has shut down and no longer accepts commands
    #[error("auction engine is not running")]
    Unavailable,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_messages_are_actionable() {
        let err = AuctionError::IncrementTooSmall {
            offered: dec!(5_000),
            minimum: dec!(5_500),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("5000"));
        assert!(msg.contains("5500"));

        let err = AuctionError::InsufficientBidders {
            required: 2,
            actual: 1,
        };
        assert!(format!("{}", err).contains("at least 2"));
    }

    #[test]
    fn test_rule_violation_wraps() {
        let violation = RuleViolation::Insolvent {
            bid: dec!(20_000),
            remaining: dec!(10_000),
        };
        let err: AuctionError = violation.clone().into();
        assert_eq!(err, AuctionError::RuleViolation(violation));
    }
}
