//! Randomized invariant tests for the order book.
//!
//! A seeded RNG drives long mixed sequences of limit placements, market
//! orders and cancellations. After every step the book is checked for:
//! 1. Volume conservation per level and per side
//! 2. No empty price levels
//! 3. The id index and the levels describing the same set of orders
//! 4. Price priority of level iteration
//!
//! ```bash
//! cargo test --release --test book_invariants -- --nocapture
//! ```

use std::collections::HashSet;

use limit_exchange::{BookError, Order, OrderBook, Side};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Base price: 10000.00000000 (fixed-point)
const BASE_PRICE: u64 = 1_000_000_000_000;

/// Check every structural invariant of the book.
fn assert_invariants(book: &OrderBook, known: &HashSet<u64>) {
    let mut seen = HashSet::new();

    for (side, levels) in [
        (Side::Sell, book.best_asks().collect::<Vec<_>>()),
        (Side::Buy, book.best_bids().collect::<Vec<_>>()),
    ] {
        let mut side_volume = 0;
        let mut last_price: Option<u64> = None;

        for level in levels {
            assert!(!level.is_empty(), "empty level {} left in book", level.price);

            if let Some(last) = last_price {
                match side {
                    Side::Sell => assert!(level.price > last, "asks out of order"),
                    Side::Buy => assert!(level.price < last, "bids out of order"),
                }
            }
            last_price = Some(level.price);

            let orders: Vec<_> = book.limit_orders(level).collect();
            assert_eq!(orders.len(), level.order_count);
            assert_eq!(orders.iter().map(|o| o.remaining).sum::<u64>(), level.total_volume);

            for window in orders.windows(2) {
                assert!(window[0].id < window[1].id, "level {} is not FIFO", level.price);
            }

            for order in orders {
                assert!(order.remaining > 0, "filled order {} still resting", order.id);
                assert_eq!(order.side(), side);
                assert_eq!(order.price, level.price);
                assert!(seen.insert(order.id), "order {} rests twice", order.id);
                assert!(book.contains_order(order.id));
            }

            side_volume += level.total_volume;
        }

        assert_eq!(book.side_total_volume(side), side_volume);
    }

    assert_eq!(seen.len(), book.order_count());
    assert_eq!(&seen, known, "id index and levels disagree");
}

/// Run `steps` random operations, checking invariants after each.
/// Returns (matches, rejected market orders, cancels).
fn run_random_sequence(seed: u64, steps: usize) -> (usize, usize, usize) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut book = OrderBook::with_capacity(steps);
    let mut resting: Vec<u64> = Vec::new();
    let mut known: HashSet<u64> = HashSet::new();
    let (mut match_count, mut rejected, mut cancels) = (0, 0, 0);

    for _ in 0..steps {
        let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };

        match rng.gen_range(0..10) {
            0..=5 => {
                // Price within ±20 ticks of 1.0
                let ticks: i64 = rng.gen_range(-20..=20);
                let price = (BASE_PRICE as i64 + ticks * 100_000_000) as u64;
                let size = rng.gen_range(1..=50) * 10_000_000;
                let order = Order::new(side, size);
                resting.push(order.id);
                known.insert(order.id);
                book.place_limit_order(price, order).unwrap();
            }
            6..=7 => {
                let mut order = Order::new(side, rng.gen_range(1..=200) * 10_000_000);
                let before = book.state_root();
                match book.place_market_order(&mut order) {
                    Ok(matches) => {
                        assert!(order.is_filled());
                        assert_eq!(
                            matches.iter().map(|m| m.quantity()).sum::<u64>(),
                            order.quantity
                        );
                        match_count += matches.len();
                    }
                    Err(BookError::InsufficientLiquidity { .. }) => {
                        assert_eq!(book.state_root(), before, "failed market order changed the book");
                        rejected += 1;
                    }
                    Err(e) => panic!("unexpected error {e}"),
                }
                known.retain(|id| book.contains_order(*id));
            }
            _ => {
                if resting.is_empty() {
                    continue;
                }
                let idx = rng.gen_range(0..resting.len());
                let id = resting.swap_remove(idx);
                match book.cancel_order(id) {
                    Ok(order) => {
                        assert_eq!(order.id, id);
                        assert!(known.remove(&id));
                        cancels += 1;
                    }
                    Err(BookError::OrderNotFound { .. }) => assert!(!known.contains(&id)),
                    Err(e) => panic!("unexpected error {e}"),
                }
            }
        }

        assert_invariants(&book, &known);
    }

    (match_count, rejected, cancels)
}

// ============================================================================
// TESTS
// ============================================================================

#[test]
fn random_sequences_preserve_invariants() {
    for seed in [1, 7, 42, 12345] {
        let (matches, rejected, cancels) = run_random_sequence(seed, 2_000);
        println!("seed {seed}: {matches} matches, {rejected} rejected, {cancels} cancels");
        assert!(matches > 0, "expected some matching for seed {seed}");
        assert!(cancels > 0, "expected some cancels for seed {seed}");
    }
}

#[test]
fn same_seed_same_book() {
    /// Level prices and queued sizes; ids differ between runs
    fn book_shape(seed: u64) -> Vec<(u64, Vec<u64>)> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut book = OrderBook::new();
        for _ in 0..500 {
            let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
            let price = BASE_PRICE + rng.gen_range(0..10) * 100_000_000;
            let size = rng.gen_range(1..=10) * 10_000_000;
            if rng.gen_bool(0.8) {
                book.place_limit_order(price, Order::new(side, size)).unwrap();
            } else {
                let _ = book.place_market_order(&mut Order::new(side, size));
            }
        }

        book.best_asks()
            .chain(book.best_bids())
            .map(|level| (level.price, book.limit_orders(level).map(|o| o.remaining).collect()))
            .collect()
    }

    assert_eq!(book_shape(99), book_shape(99));
    assert_ne!(book_shape(99), book_shape(100));
}
