//! Read-only views of the book handed to callers.

use crate::types::{Order, Side};

/// One resting order as seen from outside the book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestingOrder {
    pub order_id: u64,
    pub price: u64,
    /// Remaining size (fixed-point)
    pub size: u64,
    pub side: Side,
    pub timestamp: u64,
}

impl RestingOrder {
    pub fn new(order: &Order, price: u64) -> Self {
        Self {
            order_id: order.id,
            price,
            size: order.remaining,
            side: order.side(),
            timestamp: order.timestamp,
        }
    }
}

/// Both sides of the book, flattened best price first, then FIFO.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookSnapshot {
    pub total_bid_volume: u64,
    pub total_ask_volume: u64,
    pub asks: Vec<RestingOrder>,
    pub bids: Vec<RestingOrder>,
}
