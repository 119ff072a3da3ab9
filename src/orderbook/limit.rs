//! Price levels.
//!
//! A `Limit` is every order resting at one price on one side. Orders form
//! a FIFO queue (doubly-linked list through the slab):
//!
//! ```text
//! head (oldest) <-> order2 <-> order3 <-> tail (newest)
//! ```
//!
//! - New orders are appended at the tail
//! - Matching consumes orders from the head
//! - Any order can be unlinked in O(1) using its slab key
//!
//! `total_volume` is kept equal to the sum of `remaining` over the queue.

use slab::Slab;

use crate::orderbook::OrderNode;
use crate::types::{Match, Order};

/// A price level. The order data lives in the slab; this struct only
/// holds the queue metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limit {
    /// Price for this level (fixed-point)
    pub price: u64,

    /// Sum of the remaining quantity of every order in the queue
    pub total_volume: u64,

    /// Oldest order (slab key), the next one to match
    pub head: Option<usize>,

    /// Newest order (slab key)
    pub tail: Option<usize>,

    pub order_count: usize,
}

/// Result of walking one level with an incoming order.
#[derive(Debug, Default)]
pub struct LevelFill {
    /// Executions in the order they happened
    pub matches: Vec<Match>,

    /// Slab keys of resting orders that were filled and unlinked.
    /// The caller still owns their slab slots and index entries.
    pub filled: Vec<usize>,
}

impl Limit {
    pub fn new(price: u64) -> Self {
        Self {
            price,
            total_volume: 0,
            head: None,
            tail: None,
            order_count: 0,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order_count == 0
    }

    /// Append an order to the tail of the queue.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not in the slab.
    pub fn add_order(&mut self, key: usize, orders: &mut Slab<OrderNode>) {
        let node = orders.get_mut(key).expect("Invalid slab key");
        let quantity = node.remaining();

        node.prev = self.tail;
        node.next = None;
        node.level = Some(self.price);
        node.order.price = self.price;

        match self.tail {
            Some(tail_key) => {
                orders.get_mut(tail_key).expect("Invalid tail key").next = Some(key);
            }
            None => self.head = Some(key),
        }

        self.tail = Some(key);
        self.order_count += 1;
        self.total_volume += quantity;
    }

    /// Unlink an order from the queue by slab key.
    ///
    /// Returns the remaining quantity the order took with it.
    pub fn remove_order(&mut self, key: usize, orders: &mut Slab<OrderNode>) -> u64 {
        let node = orders.get(key).expect("Invalid slab key");
        debug_assert_eq!(node.level, Some(self.price), "order does not rest on this level");
        let quantity = node.remaining();
        let prev_key = node.prev;
        let next_key = node.next;

        match prev_key {
            Some(prev) => orders.get_mut(prev).expect("Invalid prev key").next = next_key,
            None => self.head = next_key,
        }

        match next_key {
            Some(next) => orders.get_mut(next).expect("Invalid next key").prev = prev_key,
            None => self.tail = prev_key,
        }

        let node = orders.get_mut(key).expect("Invalid slab key");
        node.prev = None;
        node.next = None;
        node.level = None;

        self.order_count -= 1;
        self.total_volume -= quantity;

        quantity
    }

    /// Match an incoming order against this level, oldest order first.
    ///
    /// Each execution fills `min(resting, incoming)` at this level's price.
    /// Stops once the incoming order is filled or the queue runs out.
    /// Resting orders filled along the way are unlinked after the walk.
    pub fn fill(&mut self, incoming: &mut Order, orders: &mut Slab<OrderNode>) -> LevelFill {
        let mut result = LevelFill::default();
        let incoming_side = incoming.side();
        let mut cursor = self.head;

        while let Some(key) = cursor {
            if incoming.is_filled() {
                break;
            }

            let node = orders.get_mut(key).expect("Invalid slab key");
            let quantity = node.remaining().min(incoming.remaining);
            assert!(quantity > 0, "resting order {} has no remaining size", node.order_id());

            node.fill(quantity);
            incoming.fill(quantity);
            self.total_volume -= quantity;

            result.matches.push(Match::new(
                node.order_id(),
                incoming.id,
                incoming_side,
                quantity,
                self.price,
            ));

            if node.is_filled() {
                result.filled.push(key);
            }
            cursor = node.next;
        }

        for &key in &result.filled {
            self.remove_order(key, orders);
        }

        result
    }

    /// Iterate the resting orders oldest first
    pub fn iter<'a>(&self, orders: &'a Slab<OrderNode>) -> LimitOrders<'a> {
        LimitOrders {
            orders,
            cursor: self.head,
        }
    }
}

/// FIFO iterator over the orders of one level.
pub struct LimitOrders<'a> {
    orders: &'a Slab<OrderNode>,
    cursor: Option<usize>,
}

impl<'a> Iterator for LimitOrders<'a> {
    type Item = &'a Order;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.orders.get(self.cursor?)?;
        self.cursor = node.next;
        Some(&node.order)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;

    const PRICE: u64 = 1_000_000_000_000;

    fn insert_sell(slab: &mut Slab<OrderNode>, quantity: u64) -> usize {
        slab.insert(OrderNode::new(Order::new(Side::Sell, quantity)))
    }

    fn ids(level: &Limit, slab: &Slab<OrderNode>) -> Vec<u64> {
        level.iter(slab).map(|o| o.id).collect()
    }

    #[test]
    fn test_limit_new() {
        let level = Limit::new(PRICE);

        assert_eq!(level.price, PRICE);
        assert_eq!(level.total_volume, 0);
        assert!(level.head.is_none());
        assert!(level.tail.is_none());
        assert!(level.is_empty());
    }

    #[test]
    fn test_add_order_links_and_tracks_volume() {
        let mut slab = Slab::with_capacity(10);
        let mut level = Limit::new(PRICE);

        let key1 = insert_sell(&mut slab, 100);
        let key2 = insert_sell(&mut slab, 200);
        let key3 = insert_sell(&mut slab, 300);
        level.add_order(key1, &mut slab);
        level.add_order(key2, &mut slab);
        level.add_order(key3, &mut slab);

        assert_eq!(level.order_count, 3);
        assert_eq!(level.total_volume, 600);
        assert_eq!(level.head, Some(key1));
        assert_eq!(level.tail, Some(key3));

        let node2 = &slab[key2];
        assert_eq!(node2.prev, Some(key1));
        assert_eq!(node2.next, Some(key3));
        assert_eq!(node2.level, Some(PRICE));
        assert_eq!(node2.order.price, PRICE);
    }

    #[test]
    fn test_remove_middle_keeps_fifo() {
        let mut slab = Slab::with_capacity(10);
        let mut level = Limit::new(PRICE);

        let key1 = insert_sell(&mut slab, 100);
        let key2 = insert_sell(&mut slab, 200);
        let key3 = insert_sell(&mut slab, 300);
        for key in [key1, key2, key3] {
            level.add_order(key, &mut slab);
        }

        assert_eq!(level.remove_order(key2, &mut slab), 200);

        assert_eq!(level.order_count, 2);
        assert_eq!(level.total_volume, 400);
        assert_eq!(ids(&level, &slab), vec![slab[key1].order_id(), slab[key3].order_id()]);
        assert!(!slab[key2].is_resting());
        assert!(slab[key2].prev.is_none() && slab[key2].next.is_none());
    }

    #[test]
    fn test_remove_head_and_tail() {
        let mut slab = Slab::with_capacity(10);
        let mut level = Limit::new(PRICE);

        let key1 = insert_sell(&mut slab, 100);
        let key2 = insert_sell(&mut slab, 200);
        level.add_order(key1, &mut slab);
        level.add_order(key2, &mut slab);

        level.remove_order(key1, &mut slab);
        assert_eq!(level.head, Some(key2));
        assert_eq!(level.tail, Some(key2));

        level.remove_order(key2, &mut slab);
        assert!(level.is_empty());
        assert_eq!(level.total_volume, 0);
        assert!(level.head.is_none());
        assert!(level.tail.is_none());
    }

    #[test]
    fn test_fill_partial_head() {
        let mut slab = Slab::with_capacity(10);
        let mut level = Limit::new(PRICE);
        let key = insert_sell(&mut slab, 20);
        level.add_order(key, &mut slab);

        let mut incoming = Order::new(Side::Buy, 10);
        let fill = level.fill(&mut incoming, &mut slab);

        assert_eq!(fill.matches.len(), 1);
        assert!(fill.filled.is_empty());
        assert_eq!(fill.matches[0].quantity(), 10);
        assert_eq!(fill.matches[0].price(), PRICE);
        assert_eq!(fill.matches[0].resting_order_id(), slab[key].order_id());
        assert!(incoming.is_filled());
        assert_eq!(level.total_volume, 10);
        assert_eq!(slab[key].remaining(), 10);
    }

    #[test]
    fn test_fill_is_fifo_and_unlinks_filled() {
        let mut slab = Slab::with_capacity(10);
        let mut level = Limit::new(PRICE);
        let a = insert_sell(&mut slab, 5);
        let b = insert_sell(&mut slab, 5);
        let c = insert_sell(&mut slab, 5);
        for key in [a, b, c] {
            level.add_order(key, &mut slab);
        }

        let mut incoming = Order::new(Side::Buy, 7);
        let fill = level.fill(&mut incoming, &mut slab);

        let filled_from: Vec<_> = fill.matches.iter().map(|m| (m.resting_order_id(), m.quantity())).collect();
        assert_eq!(filled_from, vec![(slab[a].order_id(), 5), (slab[b].order_id(), 2)]);
        assert_eq!(fill.filled, vec![a]);
        assert_eq!(level.head, Some(b));
        assert_eq!(level.order_count, 2);
        assert_eq!(level.total_volume, 8);
        assert_eq!(slab[b].remaining(), 3);
        assert_eq!(slab[c].remaining(), 5);
    }

    #[test]
    fn test_fill_exhausts_level() {
        let mut slab = Slab::with_capacity(10);
        let mut level = Limit::new(PRICE);
        let a = insert_sell(&mut slab, 4);
        let b = insert_sell(&mut slab, 6);
        level.add_order(a, &mut slab);
        level.add_order(b, &mut slab);

        let mut incoming = Order::new(Side::Buy, 15);
        let fill = level.fill(&mut incoming, &mut slab);

        assert_eq!(fill.matches.len(), 2);
        assert_eq!(fill.filled, vec![a, b]);
        assert!(level.is_empty());
        assert_eq!(level.total_volume, 0);
        assert_eq!(incoming.remaining, 5);
    }

    #[test]
    fn test_fill_with_filled_incoming_is_noop() {
        let mut slab = Slab::with_capacity(10);
        let mut level = Limit::new(PRICE);
        let key = insert_sell(&mut slab, 4);
        level.add_order(key, &mut slab);

        let mut incoming = Order::new(Side::Buy, 0);
        let fill = level.fill(&mut incoming, &mut slab);

        assert!(fill.matches.is_empty());
        assert_eq!(level.total_volume, 4);
    }
}
