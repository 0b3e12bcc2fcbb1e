//! Auction replay
//!
//! Applies a JSON script of operations to a fresh engine, one at a time,
//! logging every outcome. With a fixed `--seed` the lottery draws repeat,
//! so a recorded session replays to the identical final state.
//!
//! Script format, one tagged op per array element:
//!
//! ```json
//! [
//!   {"op": "start", "item": "p7"},
//!   {"op": "bid", "bidder": "t1"},
//!   {"op": "bid", "bidder": "t2", "amount": 17000},
//!   {"op": "match", "bidder": "t3"},
//!   {"op": "lottery"},
//!   {"op": "close"},
//!   {"op": "force_resolve", "item": "p8", "bidder": "t1", "amount": 9000},
//!   {"op": "reset_all"}
//! ]
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use gavel_bins::common::{init_logging, print_stats, spawn_event_printer, CommonArgs};
use gavel_core::config::{AuctionConfig, PolicyChoice, PoolFile};
use gavel_core::core::{Bidder, BidderId, Item, ItemId};
use gavel_core::engine::{AuctionHandle, AuctionWorker, Coordinator};
use gavel_core::notify::ChannelNotifier;
use gavel_core::rules::RulePolicy;
use gavel_core::store::MemoryStore;
use gavel_policies::{CombinedPolicy, PerTierPolicy};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct ReplayArgs {
    /// Script file (JSON array of operations)
    script: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum ScriptOp {
    Start {
        item: ItemId,
    },
    Bid {
        bidder: BidderId,
        #[serde(default)]
        amount: Option<Decimal>,
    },
    Match {
        bidder: BidderId,
    },
    Lottery,
    Close {
        #[serde(default)]
        force_unsold: bool,
    },
    ForceResolve {
        item: ItemId,
        bidder: BidderId,
        amount: Decimal,
    },
    Reset,
    ResetAll,
}

fn main() -> Result<()> {
    let args = ReplayArgs::parse();
    init_logging(&args.common.log_level)?;

    let config = match &args.common.config {
        Some(path) => AuctionConfig::load(path)?,
        None => AuctionConfig::default(),
    };
    let pool = PoolFile::load(&args.common.pool)?;
    let (items, bidders) = pool.build(&config);

    let raw = fs::read_to_string(&args.script)
        .with_context(|| format!("failed to read script {:?}", args.script))?;
    let script: Vec<ScriptOp> = serde_json::from_str(&raw)
        .with_context(|| format!("invalid script {:?}", args.script))?;

    tracing::info!("=== Gavel: Replay ===");
    tracing::info!("Ops: {}, seed: {}", script.len(), args.common.seed.unwrap_or(0));

    match config.policy {
        PolicyChoice::PerTier => {
            run(PerTierPolicy::default(), config, items, bidders, script, &args)
        }
        PolicyChoice::Combined => {
            run(CombinedPolicy::default(), config, items, bidders, script, &args)
        }
    }
}

fn run<P: RulePolicy + 'static>(
    policy: P,
    config: AuctionConfig,
    items: Vec<Item>,
    bidders: Vec<Bidder>,
    script: Vec<ScriptOp>,
    args: &ReplayArgs,
) -> Result<()> {
    let store = MemoryStore::load(items, bidders);
    let (notifier, events) = ChannelNotifier::new();
    let printer = spawn_event_printer(events, args.common.events_json);

    // Seed defaults to 0 so unseeded replays are still repeatable
    let coordinator = Coordinator::with_seed(
        store,
        notifier,
        policy,
        config,
        args.common.seed.unwrap_or(0),
    );
    let worker = AuctionWorker::spawn(coordinator)?;
    let handle = worker.handle();

    let mut failures = 0usize;
    for (index, op) in script.into_iter().enumerate() {
        if let Err(err) = apply(&handle, &op) {
            failures += 1;
            tracing::warn!(index, ?op, %err, "op rejected");
        }
    }
    if failures > 0 {
        tracing::warn!("{} op(s) rejected during replay", failures);
    }

    let full = handle.full_state()?;
    println!("{}", serde_json::to_string_pretty(&full)?);
    print_stats(&handle.stats()?);

    drop(worker);
    let _ = printer.join();
    Ok(())
}

fn apply(handle: &AuctionHandle, op: &ScriptOp) -> Result<()> {
    match op.clone() {
        ScriptOp::Start { item } => {
            handle.start(item)?;
        }
        ScriptOp::Bid { bidder, amount } => {
            handle.place_bid(bidder, amount)?;
        }
        ScriptOp::Match { bidder } => {
            handle.match_bid(bidder)?;
        }
        ScriptOp::Lottery => {
            let (_, winner) = handle.run_lottery()?;
            tracing::info!(winner = %winner.id, "lottery");
        }
        ScriptOp::Close { force_unsold } => {
            handle.close(force_unsold)?;
        }
        ScriptOp::ForceResolve {
            item,
            bidder,
            amount,
        } => {
            handle.force_resolve(item, bidder, amount)?;
        }
        ScriptOp::Reset => {
            handle.reset_lot()?;
        }
        ScriptOp::ResetAll => {
            handle.reset_all()?;
        }
    }
    Ok(())
}
