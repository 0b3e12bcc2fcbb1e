//! Auction coordinator - the serialized lot lifecycle
//!
//! Owns the single mutable piece of shared state (the current lot) and the
//! only write path into the entity ledgers. Every operation is one atomic
//! read-validate-commit unit under one lock:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Coordinator<S: EntityStore, N: Notifier, P: RulePolicy>     │
//! │                                                              │
//! │   lock ──→ read entities ──→ validate ──→ mutate lot ──┐     │
//! │     ▲                        (rule engine,  (→ entities │     │
//! │     │                         state checks)  on close)  │     │
//! │     └──────────────────────── unlock ◀──────────────────┘     │
//! │                                  │                           │
//! │                                  ▼                           │
//! │                     notifier.publish(event)                  │
//! │                     (fire-and-forget, no lock held)          │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rejections return before any mutation, so there is never partial state
//! to roll back. The rule engine is re-run against a fresh entity snapshot
//! on every bid/match attempt; nothing is cached across operations.

use crate::config::AuctionConfig;
use crate::core::{AuctionError, Bidder, BidderId, Item, ItemId, ItemStatus, Lot, LotState};
use crate::notify::{AuctionEvent, Notifier};
use crate::resolution::{resolve_no_sale, NoSale};
use crate::rules::{BidValidator, RulePolicy, RuleViolation};
use crate::store::EntityStore;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

/// Outcome of closing or force-resolving a lot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LotClose {
    /// The head bidder won; entities reflect the debit and the Sold mark
    Sold {
        item: Item,
        bidder: Bidder,
        price: Decimal,
    },
    /// No winner; the resolution policy decided the item's fate
    NoSale { item: Item, outcome: NoSale },
}

/// Snapshot of the lot plus the entities it references
#[derive(Debug, Clone, Serialize)]
pub struct CurrentLot {
    pub lot: LotState,
    pub item: Option<Item>,
    pub matching: Vec<Bidder>,
}

/// Snapshot of everything an observer needs to render the auction
#[derive(Debug, Clone, Serialize)]
pub struct FullState {
    pub lot: LotState,
    pub items: Vec<Item>,
    pub bidders: Vec<Bidder>,
}

/// Operation counters, reported at shutdown
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct AuctionStats {
    pub lots_started: u64,
    pub bids_accepted: u64,
    pub matches_accepted: u64,
    pub lotteries_run: u64,
    pub sales: u64,
    pub no_sales: u64,
    pub rejections: u64,
}

#[derive(Default)]
struct Counters {
    lots_started: AtomicU64,
    bids_accepted: AtomicU64,
    matches_accepted: AtomicU64,
    lotteries_run: AtomicU64,
    sales: AtomicU64,
    no_sales: AtomicU64,
    rejections: AtomicU64,
}

/// State under the serialization lock
struct Slot {
    lot: Option<Lot>,
    rng: StdRng,
}

/// The auction coordinator
///
/// All operations take `&self`; callers on any thread observe a single
/// serialized history of the lot and the ledgers.
pub struct Coordinator<S: EntityStore, N: Notifier, P: RulePolicy> {
    pub store: S,
    notifier: N,
    validator: BidValidator<P>,
    config: AuctionConfig,
    slot: Mutex<Slot>,
    counters: Counters,
}

impl<S: EntityStore, N: Notifier, P: RulePolicy> Coordinator<S, N, P> {
    pub fn new(store: S, notifier: N, policy: P, config: AuctionConfig) -> Self {
        Self::with_rng(store, notifier, policy, config, StdRng::from_entropy())
    }

    /// Deterministic lottery draws for tests and replays
    pub fn with_seed(store: S, notifier: N, policy: P, config: AuctionConfig, seed: u64) -> Self {
        Self::with_rng(store, notifier, policy, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(store: S, notifier: N, policy: P, config: AuctionConfig, rng: StdRng) -> Self {
        let validator = BidValidator::new(policy, config.clone());
        info!(policy = validator.policy_name(), "coordinator initialized");
        Self {
            store,
            notifier,
            validator,
            config,
            slot: Mutex::new(Slot { lot: None, rng }),
            counters: Counters::default(),
        }
    }

    /// Put an item up for bid. Legal only while idle and only for an
    /// Available item.
    pub fn start(&self, item_id: &ItemId) -> Result<LotState, AuctionError> {
        self.track(self.start_inner(item_id))
    }

    fn start_inner(&self, item_id: &ItemId) -> Result<LotState, AuctionError> {
        let mut slot = self.slot.lock();
        if slot.lot.is_some() {
            return Err(AuctionError::InvalidState("a lot is already active"));
        }

        let item = self
            .store
            .get_item(item_id)
            .ok_or_else(|| AuctionError::ItemNotFound(item_id.clone()))?;
        match item.status {
            ItemStatus::Available => {}
            ItemStatus::Sold => return Err(AuctionError::InvalidState("item is already sold")),
            ItemStatus::Withdrawn => {
                return Err(AuctionError::InvalidState("item has been withdrawn"))
            }
        }

        slot.lot = Some(Lot::open(item.id.clone(), item.base_price));
        let state = LotState::from_slot(slot.lot.as_ref());
        drop(slot);

        self.counters.lots_started.fetch_add(1, Ordering::Relaxed);
        info!(item = %item.id, round = item.round, price = %item.base_price, "lot started");
        self.notifier.publish(AuctionEvent::LotStarted {
            lot: state.clone(),
            item,
        });
        Ok(state)
    }

    /// Place a bid, taking the exclusive lead
    ///
    /// Without an explicit amount: claim at the current price if nobody has
    /// bid yet, otherwise current price plus the dynamic increment. An
    /// explicit amount must clear the same minimum.
    pub fn place_bid(
        &self,
        bidder_id: &BidderId,
        amount: Option<Decimal>,
    ) -> Result<LotState, AuctionError> {
        self.track(self.place_bid_inner(bidder_id, amount))
    }

    fn place_bid_inner(
        &self,
        bidder_id: &BidderId,
        amount: Option<Decimal>,
    ) -> Result<LotState, AuctionError> {
        let mut slot = self.slot.lock();
        let lot = slot
            .lot
            .as_mut()
            .ok_or(AuctionError::InvalidState("no active lot"))?;

        let item = self
            .store
            .get_item(&lot.item_id)
            .ok_or_else(|| AuctionError::ItemNotFound(lot.item_id.clone()))?;
        let bidder = self
            .store
            .get_bidder(bidder_id)
            .ok_or_else(|| AuctionError::BidderNotFound(bidder_id.clone()))?;

        let step = self.config.increments.step(item.category, lot.price);
        let next_bid = match amount {
            Some(amount) => {
                if lot.has_bidders() {
                    let minimum = lot.price + step;
                    if amount < minimum {
                        return Err(AuctionError::IncrementTooSmall {
                            offered: amount,
                            minimum,
                        });
                    }
                } else if amount < item.base_price {
                    return Err(AuctionError::IncrementTooSmall {
                        offered: amount,
                        minimum: item.base_price,
                    });
                }
                amount
            }
            // First bid claims at the opening price; later bids step up
            None => {
                if lot.has_bidders() {
                    lot.price + step
                } else {
                    lot.price
                }
            }
        };

        let all_items = self.store.list_items();
        self.validator
            .admissible(&bidder, &item, next_bid, &all_items)?;

        lot.take_lead(bidder_id.clone(), next_bid);
        let state = LotState::from_slot(slot.lot.as_ref());
        drop(slot);

        self.counters.bids_accepted.fetch_add(1, Ordering::Relaxed);
        debug!(bidder = %bidder_id, price = %next_bid, "bid accepted");
        self.notifier
            .publish(AuctionEvent::BidPlaced { lot: state.clone() });
        Ok(state)
    }

    /// Match the current price without raising it, becoming the new leader
    pub fn match_bid(&self, bidder_id: &BidderId) -> Result<LotState, AuctionError> {
        self.track(self.match_bid_inner(bidder_id))
    }

    fn match_bid_inner(&self, bidder_id: &BidderId) -> Result<LotState, AuctionError> {
        let mut slot = self.slot.lock();
        let lot = slot
            .lot
            .as_mut()
            .ok_or(AuctionError::InvalidState("no active lot"))?;

        if !lot.has_bidders() {
            return Err(AuctionError::InsufficientBidders {
                required: 1,
                actual: 0,
            });
        }
        if lot.is_matching(bidder_id) {
            return Err(AuctionError::DuplicateBidder(bidder_id.clone()));
        }

        let item = self
            .store
            .get_item(&lot.item_id)
            .ok_or_else(|| AuctionError::ItemNotFound(lot.item_id.clone()))?;
        let bidder = self
            .store
            .get_bidder(bidder_id)
            .ok_or_else(|| AuctionError::BidderNotFound(bidder_id.clone()))?;

        let all_items = self.store.list_items();
        self.validator
            .admissible(&bidder, &item, lot.price, &all_items)?;

        lot.match_lead(bidder_id.clone());
        let state = LotState::from_slot(slot.lot.as_ref());
        drop(slot);

        self.counters.matches_accepted.fetch_add(1, Ordering::Relaxed);
        debug!(bidder = %bidder_id, price = %state.price, "match accepted");
        self.notifier
            .publish(AuctionEvent::MatchPlaced { lot: state.clone() });
        Ok(state)
    }

    /// Break a matching tie by a uniform random draw. Privileged.
    pub fn run_lottery(&self) -> Result<(LotState, Bidder), AuctionError> {
        self.track(self.run_lottery_inner())
    }

    fn run_lottery_inner(&self) -> Result<(LotState, Bidder), AuctionError> {
        let mut slot = self.slot.lock();
        let Slot { lot, rng } = &mut *slot;
        let lot = lot
            .as_mut()
            .ok_or(AuctionError::InvalidState("no active lot"))?;

        let candidates = lot.bidders.len();
        if candidates < 2 {
            return Err(AuctionError::InsufficientBidders {
                required: 2,
                actual: candidates,
            });
        }

        let winner_id = lot.bidders[rng.gen_range(0..candidates)].clone();
        let winner = self
            .store
            .get_bidder(&winner_id)
            .ok_or_else(|| AuctionError::BidderNotFound(winner_id.clone()))?;

        lot.collapse_to(winner_id.clone());
        let state = LotState::from_slot(slot.lot.as_ref());
        drop(slot);

        self.counters.lotteries_run.fetch_add(1, Ordering::Relaxed);
        info!(winner = %winner_id, candidates, "lottery resolved");
        self.notifier.publish(AuctionEvent::LotteryResolved {
            lot: state.clone(),
            winner: winner_id,
        });
        Ok((state, winner))
    }

    /// Close the lot: sell to the head bidder, or apply the no-sale
    /// resolution when forced or when nobody bid
    pub fn close(&self, force_unsold: bool) -> Result<LotClose, AuctionError> {
        self.track(self.close_inner(force_unsold))
    }

    fn close_inner(&self, force_unsold: bool) -> Result<LotClose, AuctionError> {
        let mut slot = self.slot.lock();
        let lot = slot
            .lot
            .as_ref()
            .ok_or(AuctionError::InvalidState("no active lot"))?;

        let item = self
            .store
            .get_item(&lot.item_id)
            .ok_or_else(|| AuctionError::ItemNotFound(lot.item_id.clone()))?;

        let winner = if force_unsold { None } else { lot.leader().cloned() };
        let price = lot.price;

        let close = match winner {
            Some(winner_id) => {
                self.store.commit_sale(&item.id, &winner_id, price)?;
                slot.lot = None;

                let item = self
                    .store
                    .get_item(&item.id)
                    .ok_or_else(|| AuctionError::ItemNotFound(item.id.clone()))?;
                let bidder = self
                    .store
                    .get_bidder(&winner_id)
                    .ok_or_else(|| AuctionError::BidderNotFound(winner_id.clone()))?;

                self.counters.sales.fetch_add(1, Ordering::Relaxed);
                info!(item = %item.id, winner = %bidder.id, %price, "lot closed: sold");
                LotClose::Sold {
                    item,
                    bidder,
                    price,
                }
            }
            None => {
                let outcome = resolve_no_sale(&item, &self.config.base_prices);
                self.store.commit_no_sale(&item.id, &outcome)?;
                slot.lot = None;

                let item = self
                    .store
                    .get_item(&item.id)
                    .ok_or_else(|| AuctionError::ItemNotFound(item.id.clone()))?;

                self.counters.no_sales.fetch_add(1, Ordering::Relaxed);
                info!(item = %item.id, disposition = ?outcome.disposition, "lot closed: no sale");
                LotClose::NoSale { item, outcome }
            }
        };

        let state = LotState::from_slot(slot.lot.as_ref());
        drop(slot);

        let (item, bidder) = match &close {
            LotClose::Sold { item, bidder, .. } => (item.clone(), Some(bidder.clone())),
            LotClose::NoSale { item, .. } => (item.clone(), None),
        };
        self.notifier.publish(AuctionEvent::LotClosed {
            lot: state,
            item,
            bidder,
        });
        Ok(close)
    }

    /// Administrative override: sell the active lot's item to an arbitrary
    /// bidder at an arbitrary positive amount, subject to solvency only.
    /// Privileged.
    pub fn force_resolve(
        &self,
        item_id: &ItemId,
        bidder_id: &BidderId,
        amount: Decimal,
    ) -> Result<LotClose, AuctionError> {
        self.track(self.force_resolve_inner(item_id, bidder_id, amount))
    }

    fn force_resolve_inner(
        &self,
        item_id: &ItemId,
        bidder_id: &BidderId,
        amount: Decimal,
    ) -> Result<LotClose, AuctionError> {
        if amount <= Decimal::ZERO {
            return Err(AuctionError::InvalidState(
                "force-resolve amount must be positive",
            ));
        }

        let mut slot = self.slot.lock();
        let lot = slot
            .lot
            .as_ref()
            .ok_or(AuctionError::InvalidState("no active lot"))?;
        if lot.item_id != *item_id {
            return Err(AuctionError::InvalidState("item is not the active lot"));
        }

        let bidder = self
            .store
            .get_bidder(bidder_id)
            .ok_or_else(|| AuctionError::BidderNotFound(bidder_id.clone()))?;
        if amount > bidder.remaining_budget {
            return Err(AuctionError::RuleViolation(RuleViolation::Insolvent {
                bid: amount,
                remaining: bidder.remaining_budget,
            }));
        }

        self.store.commit_sale(item_id, bidder_id, amount)?;
        slot.lot = None;

        let item = self
            .store
            .get_item(item_id)
            .ok_or_else(|| AuctionError::ItemNotFound(item_id.clone()))?;
        let bidder = self
            .store
            .get_bidder(bidder_id)
            .ok_or_else(|| AuctionError::BidderNotFound(bidder_id.clone()))?;
        let state = LotState::from_slot(slot.lot.as_ref());
        drop(slot);

        self.counters.sales.fetch_add(1, Ordering::Relaxed);
        info!(item = %item_id, winner = %bidder_id, %amount, "lot force-resolved");
        self.notifier.publish(AuctionEvent::LotClosed {
            lot: state,
            item: item.clone(),
            bidder: Some(bidder.clone()),
        });
        Ok(LotClose::Sold {
            item,
            bidder,
            price: amount,
        })
    }

    /// Abort the in-progress lot with no side effects to entities.
    /// Idempotent. Privileged.
    pub fn reset_lot(&self) -> Result<LotState, AuctionError> {
        let mut slot = self.slot.lock();
        let discarded = LotState::from_slot(slot.lot.take().as_ref());
        let state = LotState::from_slot(slot.lot.as_ref());
        drop(slot);

        info!(item = ?discarded.item_id, "lot reset");
        self.notifier
            .publish(AuctionEvent::LotAborted { lot: discarded });
        Ok(state)
    }

    /// Restore the entire auction to its pool-load state: original
    /// categories, base prices, rounds, statuses and budgets. Privileged.
    pub fn reset_all(&self) -> Result<FullState, AuctionError> {
        let mut slot = self.slot.lock();
        slot.lot = None;
        self.store.reset_all()?;
        let state = LotState::from_slot(slot.lot.as_ref());
        let items = self.store.list_items();
        let bidders = self.store.list_bidders();
        drop(slot);

        info!(items = items.len(), bidders = bidders.len(), "full auction reset");
        self.notifier.publish(AuctionEvent::FullReset {
            items: items.clone(),
            bidders: bidders.clone(),
        });
        Ok(FullState {
            lot: state,
            items,
            bidders,
        })
    }

    /// The active lot with its item and matching bidders resolved
    ///
    /// Entity reads happen under the serialization lock so the snapshot can
    /// never interleave with a half-applied close. The reads are in-memory
    /// and the coordinator is the only writer, so the hold is short.
    pub fn current(&self) -> CurrentLot {
        let slot = self.slot.lock();
        let state = LotState::from_slot(slot.lot.as_ref());
        let item = state.item_id.as_ref().and_then(|id| self.store.get_item(id));
        let matching = state
            .bidders
            .iter()
            .filter_map(|id| self.store.get_bidder(id))
            .collect();
        drop(slot);
        CurrentLot {
            lot: state,
            item,
            matching,
        }
    }

    /// Everything an observer needs to render the auction
    ///
    /// Taken under the serialization lock: the items and ledgers in one
    /// snapshot always reflect the same committed history.
    pub fn full_state(&self) -> FullState {
        let slot = self.slot.lock();
        let state = LotState::from_slot(slot.lot.as_ref());
        let items = self.store.list_items();
        let bidders = self.store.list_bidders();
        drop(slot);
        FullState {
            lot: state,
            items,
            bidders,
        }
    }

    pub fn stats(&self) -> AuctionStats {
        AuctionStats {
            lots_started: self.counters.lots_started.load(Ordering::Relaxed),
            bids_accepted: self.counters.bids_accepted.load(Ordering::Relaxed),
            matches_accepted: self.counters.matches_accepted.load(Ordering::Relaxed),
            lotteries_run: self.counters.lotteries_run.load(Ordering::Relaxed),
            sales: self.counters.sales.load(Ordering::Relaxed),
            no_sales: self.counters.no_sales.load(Ordering::Relaxed),
            rejections: self.counters.rejections.load(Ordering::Relaxed),
        }
    }

    fn track<T>(&self, result: Result<T, AuctionError>) -> Result<T, AuctionError> {
        if let Err(err) = &result {
            self.counters.rejections.fetch_add(1, Ordering::Relaxed);
            debug!(%err, "operation rejected");
        }
        result
    }
}
