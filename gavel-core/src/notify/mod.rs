//! Notifier port: fire-and-forget broadcast of committed transitions
//!
//! The coordinator publishes an [`AuctionEvent`] after every committed state
//! change, outside its serialization lock. Delivery is best-effort by
//! contract: a notifier must never block and its failure never aborts a
//! transition. Events are serde-tagged so a transport can put them on the
//! wire without touching engine state.

use crate::core::{Bidder, BidderId, Item, LotState};
use crossbeam::channel::{unbounded, Receiver, Sender, TrySendError};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// A committed state transition, as observers see it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data")]
pub enum AuctionEvent {
    LotStarted {
        lot: LotState,
        item: Item,
    },
    BidPlaced {
        lot: LotState,
    },
    MatchPlaced {
        lot: LotState,
    },
    LotteryResolved {
        lot: LotState,
        winner: BidderId,
    },
    LotClosed {
        lot: LotState,
        item: Item,
        /// The winning bidder after the debit, absent on a no-sale
        bidder: Option<Bidder>,
    },
    /// Administrative abort of an in-progress lot; entities are untouched
    LotAborted {
        /// The lot state that was discarded, idle if none was active
        lot: LotState,
    },
    FullReset {
        items: Vec<Item>,
        bidders: Vec<Bidder>,
    },
}

/// Observer of committed transitions
pub trait Notifier: Send + Sync {
    fn publish(&self, event: AuctionEvent);
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    fn publish(&self, event: AuctionEvent) {
        (**self).publish(event)
    }
}

/// Discards everything
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn publish(&self, _event: AuctionEvent) {}
}

/// Logs each event through tracing
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn publish(&self, event: AuctionEvent) {
        match &event {
            AuctionEvent::LotStarted { lot, item } => {
                info!(item = %item.id, price = %lot.price, "lot started");
            }
            AuctionEvent::BidPlaced { lot } => {
                info!(price = %lot.price, bidders = lot.bidders.len(), "bid placed");
            }
            AuctionEvent::MatchPlaced { lot } => {
                info!(price = %lot.price, bidders = lot.bidders.len(), "bid matched");
            }
            AuctionEvent::LotteryResolved { winner, .. } => {
                info!(%winner, "lottery resolved");
            }
            AuctionEvent::LotClosed { item, bidder, .. } => match bidder {
                Some(b) => info!(item = %item.id, winner = %b.id, "lot closed: sold"),
                None => info!(item = %item.id, "lot closed: no sale"),
            },
            AuctionEvent::LotAborted { lot } => {
                info!(item = ?lot.item_id, "lot aborted");
            }
            AuctionEvent::FullReset { items, bidders } => {
                info!(items = items.len(), bidders = bidders.len(), "full reset");
            }
        }
    }
}

/// Forwards events into a channel for an out-of-process transport
///
/// Sending never blocks; if the consumer has gone away the event is dropped
/// with a warning. Dropping a broadcast is preferable to stalling the
/// serialization point.
pub struct ChannelNotifier {
    sender: Sender<AuctionEvent>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, Receiver<AuctionEvent>) {
        let (sender, receiver) = unbounded();
        (Self { sender }, receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn publish(&self, event: AuctionEvent) {
        if let Err(TrySendError::Disconnected(event)) = self.sender.try_send(event) {
            warn!(?event, "event receiver disconnected, dropping broadcast");
        }
    }
}

/// Records events for assertions in tests
#[derive(Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<AuctionEvent>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<AuctionEvent> {
        std::mem::take(&mut self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl Notifier for RecordingNotifier {
    fn publish(&self, event: AuctionEvent) {
        self.events.lock().push(event);
    }
}
