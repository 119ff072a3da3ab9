//! Order node for slab-based storage.
//!
//! `OrderNode` wraps an `Order` with doubly-linked list pointers so an
//! order can be unlinked from its price level in O(1) given its slab key.
//!
//! Orders at the same price form a list ordered oldest to newest:
//! - `prev`: the next-older order at this price
//! - `next`: the next-newer order at this price
//!
//! The node also carries `level`, the price of the `Limit` it currently
//! rests on. This is a lookup-only association: the limit owns the
//! membership, and the association is cleared when the order is unlinked.

use crate::types::{Order, Side};

/// Order node stored in the slab.
///
/// The pointers are slab keys (`usize`), not references.
#[derive(Debug, Clone)]
pub struct OrderNode {
    pub order: Order,

    /// Next (newer) order in the level queue, `None` at the tail
    pub next: Option<usize>,

    /// Previous (older) order in the level queue, `None` at the head
    pub prev: Option<usize>,

    /// Price of the owning limit, `None` while not resting
    pub level: Option<u64>,
}

impl OrderNode {
    /// Create a new order node (not yet linked)
    #[inline]
    pub fn new(order: Order) -> Self {
        Self {
            order,
            next: None,
            prev: None,
            level: None,
        }
    }

    /// Check if this node currently rests on a price level
    #[inline]
    pub fn is_resting(&self) -> bool {
        self.level.is_some()
    }

    #[inline]
    pub fn order_id(&self) -> u64 {
        self.order.id
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.order.side()
    }

    #[inline]
    pub fn remaining(&self) -> u64 {
        self.order.remaining
    }

    /// Fill a portion of this order, returning the quantity actually filled
    #[inline]
    pub(crate) fn fill(&mut self, quantity: u64) -> u64 {
        self.order.fill(quantity)
    }

    #[inline]
    pub fn is_filled(&self) -> bool {
        self.order.is_filled()
    }
}
