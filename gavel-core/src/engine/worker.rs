//! Single-writer auction worker
//!
//! Runs the coordinator on a dedicated thread fed by a bounded command
//! channel; callers hold a cheap cloneable [`AuctionHandle`] and block only
//! for their own reply. This gives transports a place to converge without
//! sharing the coordinator's lock across async runtimes:
//!
//! ```text
//!   handle.place_bid() ──┐
//!   handle.close()    ───┼──▶ [bounded channel] ──▶ worker thread
//!   handle.start()    ───┘                            │
//!         ▲                                          ▼
//!         └────────── reply channel ◀── coordinator op
//! ```
//!
//! When the worker is gone every handle call returns
//! [`AuctionError::Unavailable`] rather than panicking.

use crate::core::{AuctionError, Bidder, BidderId, ItemId, LotState};
use crate::engine::{AuctionStats, Coordinator, CurrentLot, FullState, LotClose};
use crate::notify::Notifier;
use crate::rules::RulePolicy;
use crate::store::EntityStore;
use crossbeam::channel::{bounded, Receiver, Sender};
use rust_decimal::Decimal;
use std::io;
use std::thread::{self, JoinHandle};
use tracing::info;

const COMMAND_QUEUE_DEPTH: usize = 256;

type Reply<T> = Sender<Result<T, AuctionError>>;

enum Command {
    Start {
        item: ItemId,
        reply: Reply<LotState>,
    },
    PlaceBid {
        bidder: BidderId,
        amount: Option<Decimal>,
        reply: Reply<LotState>,
    },
    MatchBid {
        bidder: BidderId,
        reply: Reply<LotState>,
    },
    RunLottery {
        reply: Reply<(LotState, Bidder)>,
    },
    Close {
        force_unsold: bool,
        reply: Reply<LotClose>,
    },
    ForceResolve {
        item: ItemId,
        bidder: BidderId,
        amount: Decimal,
        reply: Reply<LotClose>,
    },
    ResetLot {
        reply: Reply<LotState>,
    },
    ResetAll {
        reply: Reply<FullState>,
    },
    Current {
        reply: Sender<CurrentLot>,
    },
    FullState {
        reply: Sender<FullState>,
    },
    Stats {
        reply: Sender<AuctionStats>,
    },
    Shutdown,
}

/// Owns the worker thread; dropping it shuts the auction down
pub struct AuctionWorker {
    sender: Sender<Command>,
    thread: Option<JoinHandle<()>>,
}

impl AuctionWorker {
    /// Errors when the OS refuses the thread; no channel is left behind
    /// in that case.
    pub fn spawn<S, N, P>(coordinator: Coordinator<S, N, P>) -> io::Result<Self>
    where
        S: EntityStore + 'static,
        N: Notifier + 'static,
        P: RulePolicy + 'static,
    {
        let (sender, receiver) = bounded(COMMAND_QUEUE_DEPTH);
        let thread = thread::Builder::new()
            .name("auction-worker".into())
            .spawn(move || run(coordinator, receiver))?;
        Ok(Self {
            sender,
            thread: Some(thread),
        })
    }

    pub fn handle(&self) -> AuctionHandle {
        AuctionHandle {
            sender: self.sender.clone(),
        }
    }
}

impl Drop for AuctionWorker {
    fn drop(&mut self) {
        let _ = self.sender.send(Command::Shutdown);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn run<S, N, P>(coordinator: Coordinator<S, N, P>, receiver: Receiver<Command>)
where
    S: EntityStore,
    N: Notifier,
    P: RulePolicy,
{
    info!("auction worker started");
    for command in receiver {
        match command {
            Command::Start { item, reply } => {
                let _ = reply.send(coordinator.start(&item));
            }
            Command::PlaceBid {
                bidder,
                amount,
                reply,
            } => {
                let _ = reply.send(coordinator.place_bid(&bidder, amount));
            }
            Command::MatchBid { bidder, reply } => {
                let _ = reply.send(coordinator.match_bid(&bidder));
            }
            Command::RunLottery { reply } => {
                let _ = reply.send(coordinator.run_lottery());
            }
            Command::Close {
                force_unsold,
                reply,
            } => {
                let _ = reply.send(coordinator.close(force_unsold));
            }
            Command::ForceResolve {
                item,
                bidder,
                amount,
                reply,
            } => {
                let _ = reply.send(coordinator.force_resolve(&item, &bidder, amount));
            }
            Command::ResetLot { reply } => {
                let _ = reply.send(coordinator.reset_lot());
            }
            Command::ResetAll { reply } => {
                let _ = reply.send(coordinator.reset_all());
            }
            Command::Current { reply } => {
                let _ = reply.send(coordinator.current());
            }
            Command::FullState { reply } => {
                let _ = reply.send(coordinator.full_state());
            }
            Command::Stats { reply } => {
                let _ = reply.send(coordinator.stats());
            }
            Command::Shutdown => break,
        }
    }
    let stats = coordinator.stats();
    info!(
        sales = stats.sales,
        no_sales = stats.no_sales,
        rejections = stats.rejections,
        "auction worker stopped"
    );
}

/// Cloneable front door to the worker thread
#[derive(Clone)]
pub struct AuctionHandle {
    sender: Sender<Command>,
}

impl AuctionHandle {
    fn call<T>(&self, make: impl FnOnce(Reply<T>) -> Command) -> Result<T, AuctionError> {
        let (reply, response) = bounded(1);
        self.sender
            .send(make(reply))
            .map_err(|_| AuctionError::Unavailable)?;
        response.recv().map_err(|_| AuctionError::Unavailable)?
    }

    fn query<T>(&self, make: impl FnOnce(Sender<T>) -> Command) -> Result<T, AuctionError> {
        let (reply, response) = bounded(1);
        self.sender
            .send(make(reply))
            .map_err(|_| AuctionError::Unavailable)?;
        response.recv().map_err(|_| AuctionError::Unavailable)
    }

    pub fn start(&self, item: ItemId) -> Result<LotState, AuctionError> {
        self.call(|reply| Command::Start { item, reply })
    }

    pub fn place_bid(
        &self,
        bidder: BidderId,
        amount: Option<Decimal>,
    ) -> Result<LotState, AuctionError> {
        self.call(|reply| Command::PlaceBid {
            bidder,
            amount,
            reply,
        })
    }

    pub fn match_bid(&self, bidder: BidderId) -> Result<LotState, AuctionError> {
        self.call(|reply| Command::MatchBid { bidder, reply })
    }

    pub fn run_lottery(&self) -> Result<(LotState, Bidder), AuctionError> {
        self.call(|reply| Command::RunLottery { reply })
    }

    pub fn close(&self, force_unsold: bool) -> Result<LotClose, AuctionError> {
        self.call(|reply| Command::Close {
            force_unsold,
            reply,
        })
    }

    pub fn force_resolve(
        &self,
        item: ItemId,
        bidder: BidderId,
        amount: Decimal,
    ) -> Result<LotClose, AuctionError> {
        self.call(|reply| Command::ForceResolve {
            item,
            bidder,
            amount,
            reply,
        })
    }

    pub fn reset_lot(&self) -> Result<LotState, AuctionError> {
        self.call(|reply| Command::ResetLot { reply })
    }

    pub fn reset_all(&self) -> Result<FullState, AuctionError> {
        self.call(|reply| Command::ResetAll { reply })
    }

    pub fn current(&self) -> Result<CurrentLot, AuctionError> {
        self.query(|reply| Command::Current { reply })
    }

    pub fn full_state(&self) -> Result<FullState, AuctionError> {
        self.query(|reply| Command::FullState { reply })
    }

    pub fn stats(&self) -> Result<AuctionStats, AuctionError> {
        self.query(|reply| Command::Stats { reply })
    }
}
