//! Common utilities for all binaries
//!
//! Shared initialization, CLI parsing, and setup code.

use anyhow::Result;
use clap::Parser;
use crossbeam::channel::Receiver;
use gavel_core::engine::AuctionStats;
use gavel_core::notify::AuctionEvent;
use std::path::PathBuf;
use std::thread;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Common CLI arguments for all binaries
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct CommonArgs {
    /// Pool file (JSON) with the items and bidders to load
    #[arg(short, long)]
    pub pool: PathBuf,

    /// Auction config file (JSON); stock tournament rules when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Lottery seed for reproducible runs
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Emit committed events as JSON lines on stdout
    #[arg(long)]
    pub events_json: bool,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: String,
}

/// Initialize tracing/logging
pub fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    Ok(())
}

/// Drain committed events on a background thread until the engine is gone
///
/// With `json` each event goes to stdout as one JSON line; otherwise events
/// surface at debug level.
pub fn spawn_event_printer(receiver: Receiver<AuctionEvent>, json: bool) -> thread::JoinHandle<()> {
    thread::Builder::new()
        .name("event-printer".into())
        .spawn(move || {
            for event in receiver {
                if json {
                    match serde_json::to_string(&event) {
                        Ok(line) => println!("{}", line),
                        Err(err) => tracing::warn!(%err, "event serialization failed"),
                    }
                } else {
                    tracing::debug!(?event, "event");
                }
            }
        })
        .expect("spawn event printer")
}

/// Print final statistics
pub fn print_stats(stats: &AuctionStats) {
    tracing::info!("=== Final Statistics ===");
    tracing::info!("Lots started: {}", stats.lots_started);
    tracing::info!("Bids accepted: {}", stats.bids_accepted);
    tracing::info!("Matches accepted: {}", stats.matches_accepted);
    tracing::info!("Lotteries run: {}", stats.lotteries_run);
    tracing::info!("Sold: {}", stats.sales);
    tracing::info!("No-sales: {}", stats.no_sales);
    tracing::info!("Rejections: {}", stats.rejections);

    let attempts = stats.bids_accepted + stats.matches_accepted + stats.rejections;
    if attempts > 0 {
        let accept_rate = ((stats.bids_accepted + stats.matches_accepted) as f64
            / attempts as f64)
            * 100.0;
        tracing::info!("Accept rate: {:.2}%", accept_rate);
    }
}
