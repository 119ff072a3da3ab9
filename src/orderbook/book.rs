//! Limit order book for a single market.
//!
//! ## Architecture
//!
//! - **Slab**: stable storage for resting orders, addressed by key
//! - **BTreeMap** per side: price levels kept in priority order
//! - **HashMap**: order id to slab key, for O(1) cancel lookup
//!
//! ## Price Ordering
//!
//! - **Bids**: keyed by `Reverse(price)`, best = highest
//! - **Asks**: keyed by `price`, best = lowest
//!
//! Both orderings are maintained on insert/remove, so best-price
//! traversal never sorts.
//!
//! ## Matching
//!
//! Limit orders always rest, even when priced through the opposite side.
//! Market orders sweep the opposite side best price first, FIFO within a
//! level, and either fill completely or are rejected before touching the
//! book.
//!
//! ## Example
//!
//! ```
//! use limit_exchange::orderbook::OrderBook;
//! use limit_exchange::types::{Order, Side};
//!
//! let mut book = OrderBook::with_capacity(1_000);
//!
//! let ask = Order::new(Side::Sell, 2_000_000_000);      // 20.0
//! book.place_limit_order(1_000_000_000_000, ask).unwrap(); // @ 10000.0
//!
//! let mut buy = Order::new(Side::Buy, 1_000_000_000);   // 10.0
//! let matches = book.place_market_order(&mut buy).unwrap();
//!
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].price(), 1_000_000_000_000);
//! assert_eq!(book.ask_total_volume(), 1_000_000_000);
//! assert!(buy.is_filled());
//! ```

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use sha2::{Digest, Sha256};
use slab::Slab;
use tracing::{debug, instrument, trace, warn};

use crate::error::BookError;
use crate::orderbook::limit::LimitOrders;
use crate::orderbook::{BookSnapshot, Limit, OrderNode, RestingOrder};
use crate::types::{Match, Order, Side};

#[derive(Debug, Default)]
pub struct OrderBook {
    /// Resting orders. Limits refer to these by slab key.
    orders: Slab<OrderNode>,

    bids: BTreeMap<Reverse<u64>, Limit>,

    asks: BTreeMap<u64, Limit>,

    /// Order id -> slab key, for every resting order
    order_index: HashMap<u64, usize>,

    /// Sum of `total_volume` over every bid level
    bid_volume: u64,

    /// Sum of `total_volume` over every ask level
    ask_volume: u64,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a book with room for `order_capacity` resting orders
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self {
            orders: Slab::with_capacity(order_capacity),
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            order_index: HashMap::with_capacity(order_capacity),
            bid_volume: 0,
            ask_volume: 0,
        }
    }

    // ========================================================================
    // Size
    // ========================================================================

    #[inline]
    pub fn capacity(&self) -> usize {
        self.orders.capacity()
    }

    /// Number of resting orders on both sides
    #[inline]
    pub fn order_count(&self) -> usize {
        self.order_index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order_index.is_empty()
    }

    #[inline]
    pub fn bid_levels(&self) -> usize {
        self.bids.len()
    }

    #[inline]
    pub fn ask_levels(&self) -> usize {
        self.asks.len()
    }

    #[inline]
    pub fn contains_order(&self, order_id: u64) -> bool {
        self.order_index.contains_key(&order_id)
    }

    /// Look up a resting order by id
    pub fn get_order(&self, order_id: u64) -> Option<&Order> {
        let key = self.order_index.get(&order_id)?;
        self.orders.get(*key).map(|node| &node.order)
    }

    // ========================================================================
    // Placement
    // ========================================================================

    /// Rest an order at `price` on its own side.
    ///
    /// Creates the level on first use. No matching happens here, even if
    /// `price` crosses the opposite best price.
    pub fn place_limit_order(&mut self, price: u64, order: Order) -> Result<(), BookError> {
        if price == 0 {
            return Err(BookError::InvalidPrice { price });
        }
        if order.is_filled() {
            return Err(BookError::InvalidQuantity { quantity: order.remaining });
        }
        if self.order_index.contains_key(&order.id) {
            return Err(BookError::DuplicateOrderId { order_id: order.id });
        }

        let order_id = order.id;
        let side = order.side();
        let size = order.remaining;

        // Level volumes are bounded by their side's volume, so one check covers both
        let side_volume = self
            .side_total_volume(side)
            .checked_add(size)
            .ok_or(BookError::VolumeOverflow { side, size })?;

        if self.crosses(side, price) {
            debug!(order_id, ?side, price, "limit order crosses the opposite best price; resting without matching");
        }

        let key = self.orders.insert(OrderNode::new(order));
        self.order_index.insert(order_id, key);

        *self.side_volume_mut(side) = side_volume;
        match side {
            Side::Buy => self
                .bids
                .entry(Reverse(price))
                .or_insert_with(|| Limit::new(price))
                .add_order(key, &mut self.orders),
            Side::Sell => self
                .asks
                .entry(price)
                .or_insert_with(|| Limit::new(price))
                .add_order(key, &mut self.orders),
        }

        debug!(order_id, ?side, price, size, "limit order resting");
        Ok(())
    }

    /// Fill `order` entirely against the opposite side.
    ///
    /// Fails with [`BookError::InsufficientLiquidity`] and leaves the book
    /// untouched if the opposite side holds less than the order's size.
    /// On success the incoming order is filled and the matches are returned
    /// in execution order.
    #[instrument(level = "debug", skip_all, fields(order_id = order.id, side = ?order.side()))]
    pub fn place_market_order(&mut self, order: &mut Order) -> Result<Vec<Match>, BookError> {
        let side = order.side();
        let available = self.side_total_volume(side.opposite());

        if order.remaining > available {
            warn!(requested = order.remaining, available, "rejecting market order: insufficient liquidity");
            return Err(BookError::InsufficientLiquidity {
                side: side.opposite(),
                requested: order.remaining,
                available,
            });
        }

        let requested = order.remaining;
        let (matches, filled, emptied) = match side {
            Side::Buy => Self::sweep(self.asks.values_mut(), &mut self.orders, order),
            Side::Sell => Self::sweep(self.bids.values_mut(), &mut self.orders, order),
        };

        *self.side_volume_mut(side.opposite()) -= requested - order.remaining;

        for price in emptied {
            match side {
                Side::Buy => self.asks.remove(&price),
                Side::Sell => self.bids.remove(&Reverse(price)),
            };
        }

        for key in filled {
            let node = self.orders.remove(key);
            self.order_index.remove(&node.order_id());
            trace!(resting_order_id = node.order_id(), "resting order filled");
        }

        debug_assert!(order.is_filled(), "market order left unfilled after liquidity check");
        debug!(matches = matches.len(), "market order filled");
        Ok(matches)
    }

    /// Walk levels best first until `incoming` is filled.
    ///
    /// Returns the matches, the slab keys of resting orders that were filled,
    /// and the prices of levels left empty.
    fn sweep<'a>(
        levels: impl Iterator<Item = &'a mut Limit>,
        orders: &mut Slab<OrderNode>,
        incoming: &mut Order,
    ) -> (Vec<Match>, Vec<usize>, Vec<u64>) {
        let mut matches = Vec::new();
        let mut filled = Vec::new();
        let mut emptied = Vec::new();

        for level in levels {
            if incoming.is_filled() {
                break;
            }

            let fill = level.fill(incoming, orders);
            trace!(price = level.price, matches = fill.matches.len(), "swept level");
            matches.extend(fill.matches);
            filled.extend(fill.filled);

            if level.is_empty() {
                emptied.push(level.price);
            }
        }

        (matches, filled, emptied)
    }

    // ========================================================================
    // Cancellation
    // ========================================================================

    /// Remove a resting order by id and return it.
    ///
    /// Unknown ids (never placed, already filled, already cancelled) return
    /// [`BookError::OrderNotFound`] without touching the book.
    pub fn cancel_order(&mut self, order_id: u64) -> Result<Order, BookError> {
        let key = *self
            .order_index
            .get(&order_id)
            .ok_or(BookError::OrderNotFound { order_id })?;

        let node = &self.orders[key];
        let side = node.side();
        let price = node.level.expect("indexed order is not resting");

        match side {
            Side::Buy => {
                let level = self.bids.get_mut(&Reverse(price)).expect("missing bid level");
                level.remove_order(key, &mut self.orders);
                if level.is_empty() {
                    self.bids.remove(&Reverse(price));
                }
            }
            Side::Sell => {
                let level = self.asks.get_mut(&price).expect("missing ask level");
                level.remove_order(key, &mut self.orders);
                if level.is_empty() {
                    self.asks.remove(&price);
                }
            }
        }

        self.order_index.remove(&order_id);
        let order = self.orders.remove(key).order;
        *self.side_volume_mut(side) -= order.remaining;
        debug!(order_id, ?side, price, remaining = order.remaining, "order cancelled");
        Ok(order)
    }

    // ========================================================================
    // Best Price Queries
    // ========================================================================

    /// Ask levels, lowest price first
    pub fn best_asks(&self) -> impl Iterator<Item = &Limit> {
        self.asks.values()
    }

    /// Bid levels, highest price first
    pub fn best_bids(&self) -> impl Iterator<Item = &Limit> {
        self.bids.values()
    }

    /// Orders resting on `limit`, oldest first
    pub fn limit_orders<'a>(&'a self, limit: &Limit) -> LimitOrders<'a> {
        limit.iter(&self.orders)
    }

    #[inline]
    pub fn best_bid(&self) -> Option<u64> {
        self.bids.keys().next().map(|r| r.0)
    }

    #[inline]
    pub fn best_ask(&self) -> Option<u64> {
        self.asks.keys().next().copied()
    }

    /// best_ask - best_bid, when both sides exist and are not crossed
    pub fn spread(&self) -> Option<u64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) if ask >= bid => Some(ask - bid),
            _ => None,
        }
    }

    fn crosses(&self, side: Side, price: u64) -> bool {
        match side {
            Side::Buy => self.best_ask().is_some_and(|ask| price >= ask),
            Side::Sell => self.best_bid().is_some_and(|bid| price <= bid),
        }
    }

    // ========================================================================
    // Volume
    // ========================================================================

    #[inline]
    pub fn side_total_volume(&self, side: Side) -> u64 {
        match side {
            Side::Buy => self.bid_volume,
            Side::Sell => self.ask_volume,
        }
    }

    fn side_volume_mut(&mut self, side: Side) -> &mut u64 {
        match side {
            Side::Buy => &mut self.bid_volume,
            Side::Sell => &mut self.ask_volume,
        }
    }

    pub fn bid_total_volume(&self) -> u64 {
        self.side_total_volume(Side::Buy)
    }

    pub fn ask_total_volume(&self) -> u64 {
        self.side_total_volume(Side::Sell)
    }

    // ========================================================================
    // Snapshots
    // ========================================================================

    /// Flattened view of both sides, best price first then FIFO
    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot {
            total_bid_volume: self.bid_total_volume(),
            total_ask_volume: self.ask_total_volume(),
            asks: self.flatten(self.best_asks()),
            bids: self.flatten(self.best_bids()),
        }
    }

    fn flatten<'a>(&'a self, levels: impl Iterator<Item = &'a Limit>) -> Vec<RestingOrder> {
        levels
            .flat_map(move |level| {
                self.limit_orders(level)
                    .map(move |order| RestingOrder::new(order, level.price))
            })
            .collect()
    }

    /// SHA-256 over every resting order in priority order.
    ///
    /// Each order contributes its level price followed by its SSZ encoding,
    /// asks first, then bids. Two books with the same resting orders in the
    /// same queue positions produce the same root.
    pub fn state_root(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();

        for level in self.best_asks().chain(self.best_bids()) {
            for order in self.limit_orders(level) {
                hasher.update(level.price.to_le_bytes());
                let bytes = ssz_rs::serialize(order).expect("fixed-size order encoding");
                hasher.update(&bytes);
            }
        }

        let mut root = [0u8; 32];
        root.copy_from_slice(&hasher.finalize());
        root
    }

    pub fn state_root_hex(&self) -> String {
        hex::encode(self.state_root())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
