//! Test fixtures: pools, entities and pre-wired coordinators
//!
//! Shared by unit tests across the workspace; enable the `testing` feature
//! to use them from dependent crates.

pub mod fixtures;

pub use fixtures::{balanced_pool, bidder_with_budget, sold_item, standard_bidders, test_item};
