//! Scripted auction simulation
//!
//! Loads a pool file and runs the whole auction unattended: every available
//! item goes on the block, the wealthiest bidders contest it, ties go to
//! lottery, and no-sale items cycle through the requeue/downgrade/withdraw
//! pipeline until the pool drains. Useful for exercising a pool and rule
//! set end to end before a live event.

use anyhow::Result;
use clap::Parser;
use gavel_bins::common::{init_logging, print_stats, spawn_event_printer, CommonArgs};
use gavel_core::config::{AuctionConfig, PolicyChoice, PoolFile};
use gavel_core::core::{Bidder, Item};
use gavel_core::engine::{AuctionWorker, Coordinator, LotClose};
use gavel_core::notify::ChannelNotifier;
use gavel_core::rules::RulePolicy;
use gavel_core::store::MemoryStore;
use gavel_policies::{CombinedPolicy, PerTierPolicy};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// How many bidders contest each lot
const CONTENDERS_PER_LOT: usize = 3;

fn main() -> Result<()> {
    let args = CommonArgs::parse();
    init_logging(&args.log_level)?;

    let config = match &args.config {
        Some(path) => AuctionConfig::load(path)?,
        None => AuctionConfig::default(),
    };
    let pool = PoolFile::load(&args.pool)?;
    let (items, bidders) = pool.build(&config);

    tracing::info!("=== Gavel: Auction Simulation ===");
    tracing::info!("Items: {}, bidders: {}", items.len(), bidders.len());
    tracing::info!("Policy: {:?}", config.policy);

    match config.policy {
        PolicyChoice::PerTier => run(PerTierPolicy::default(), config, items, bidders, &args),
        PolicyChoice::Combined => run(CombinedPolicy::default(), config, items, bidders, &args),
    }
}

fn run<P: RulePolicy + 'static>(
    policy: P,
    config: AuctionConfig,
    items: Vec<Item>,
    bidders: Vec<Bidder>,
    args: &CommonArgs,
) -> Result<()> {
    let store = MemoryStore::load(items, bidders);
    let (notifier, events) = ChannelNotifier::new();
    let printer = spawn_event_printer(events, args.events_json);

    let coordinator = match args.seed {
        Some(seed) => Coordinator::with_seed(store, notifier, policy, config, seed),
        None => Coordinator::new(store, notifier, policy, config),
    };
    let worker = AuctionWorker::spawn(coordinator)?;
    let handle = worker.handle();

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        ctrlc::set_handler(move || {
            tracing::info!("interrupt received, finishing current lot");
            stop.store(true, Ordering::SeqCst);
        })?;
    }

    let mut lots = 0usize;
    loop {
        if stop.load(Ordering::SeqCst) {
            break;
        }

        let full = handle.full_state()?;
        let Some(item) = full.items.iter().find(|i| i.is_available()).cloned() else {
            tracing::info!("pool drained after {} lots", lots);
            break;
        };
        // A no-sale item cycles at most a handful of times before it is
        // withdrawn, so a stuck pool means a scripting bug
        if lots > full.items.len() * 8 {
            tracing::warn!("pool failed to drain, stopping");
            break;
        }
        lots += 1;

        handle.start(item.id.clone())?;

        // The wealthiest purses contest the lot: one opening bid, the rest
        // match at the same price
        let mut contenders = full.bidders.clone();
        contenders.sort_by(|a, b| b.remaining_budget.cmp(&a.remaining_budget));

        let mut joined = 0usize;
        for bidder in contenders.into_iter().take(CONTENDERS_PER_LOT) {
            let result = if joined == 0 {
                handle.place_bid(bidder.id.clone(), None)
            } else {
                handle.match_bid(bidder.id.clone())
            };
            match result {
                Ok(_) => joined += 1,
                Err(err) => tracing::debug!(bidder = %bidder.id, %err, "contender skipped"),
            }
        }

        if joined >= 2 {
            let (_, winner) = handle.run_lottery()?;
            tracing::debug!(item = %item.id, winner = %winner.id, "tie broken");
        }

        match handle.close(false)? {
            LotClose::Sold { item, bidder, price } => {
                tracing::info!(item = %item.id, winner = %bidder.id, %price, "sold");
            }
            LotClose::NoSale { item, outcome } => {
                tracing::info!(item = %item.id, disposition = ?outcome.disposition, "unsold");
            }
        }
    }

    print_stats(&handle.stats()?);

    // Dropping the worker closes the event channel and ends the printer
    drop(worker);
    let _ = printer.join();
    Ok(())
}
