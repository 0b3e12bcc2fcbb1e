//! Gavel Bins - operator entry points for the auction engine

pub mod common;
