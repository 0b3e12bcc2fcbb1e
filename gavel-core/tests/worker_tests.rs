//! Worker/handle unit tests (moved from src to break the
//! gavel-policies dev-dependency cycle in the lib test target)

#[cfg(test)]
mod tests {
    use gavel_core::core::{AuctionError, Bidder, BidderId, ItemId};
    use gavel_core::engine::{AuctionWorker, Coordinator, LotClose};
    use gavel_core::config::AuctionConfig;
    use gavel_core::core::{Category, Item};
    use gavel_core::notify::NullNotifier;
    use gavel_core::store::MemoryStore;
    use gavel_policies::PerTierPolicy;
    use rust_decimal_macros::dec;

    fn worker() -> AuctionWorker {
        let store = MemoryStore::load(
            vec![Item::new(
                ItemId::from("p1"),
                "Ava",
                Category::A,
                dec!(15_000),
            )],
            vec![
                Bidder::new(BidderId::from("t1"), "Team One", dec!(130_000)),
                Bidder::new(BidderId::from("t2"), "Team Two", dec!(130_000)),
            ],
        );
        AuctionWorker::spawn(Coordinator::with_seed(
            store,
            NullNotifier,
            PerTierPolicy::default(),
            AuctionConfig::default(),
            7,
        ))
        .expect("spawn auction worker")
    }

    #[test]
    fn test_spawn_surfaces_thread_creation_result() {
        let store = MemoryStore::load(vec![], vec![]);
        let worker = AuctionWorker::spawn(Coordinator::with_seed(
            store,
            NullNotifier,
            PerTierPolicy::default(),
            AuctionConfig::default(),
            7,
        ));
        assert!(worker.is_ok());
    }

    #[test]
    fn test_round_trip_through_handle() {
        let worker = worker();
        let handle = worker.handle();

        handle.start(ItemId::from("p1")).unwrap();
        handle.place_bid(BidderId::from("t1"), None).unwrap();
        let state = handle.match_bid(BidderId::from("t2")).unwrap();
        assert_eq!(state.bidders.len(), 2);

        let (state, _winner) = handle.run_lottery().unwrap();
        assert_eq!(state.bidders.len(), 1);

        match handle.close(false).unwrap() {
            LotClose::Sold { price, .. } => assert_eq!(price, dec!(15_000)),
            other => panic!("expected sale, got {:?}", other),
        }

        let stats = handle.stats().unwrap();
        assert_eq!(stats.sales, 1);
    }

    #[test]
    fn test_handles_share_one_worker() {
        let worker = worker();
        let a = worker.handle();
        let b = worker.handle();

        a.start(ItemId::from("p1")).unwrap();
        // Second start through the other handle hits the same serialized lot
        assert!(matches!(
            b.start(ItemId::from("p1")),
            Err(AuctionError::InvalidState(_))
        ));
    }

    #[test]
    fn test_dead_worker_reports_unavailable() {
        let worker = worker();
        let handle = worker.handle();
        drop(worker);

        assert!(matches!(
            handle.start(ItemId::from("p1")),
            Err(AuctionError::Unavailable)
        ));
        assert!(matches!(handle.current(), Err(AuctionError::Unavailable)));
    }
}
