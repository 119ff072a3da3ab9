//! Execution records produced by market orders.

use crate::types::Side;

/// One execution between an incoming order and a resting order.
///
/// The price is always the resting order's level price, never the incoming
/// order's. A `Match` is a record for the caller; the book never stores it.
///
/// ## Example
///
/// ```
/// use limit_exchange::types::{Match, Side};
///
/// let m = Match::new(7, 9, Side::Buy, 1_000_000_000, 1_000_000_000_000);
/// assert_eq!(m.ask_order_id(), 7);
/// assert_eq!(m.bid_order_id(), 9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    resting_order_id: u64,
    incoming_order_id: u64,
    incoming_side: Side,
    quantity: u64,
    price: u64,
}

impl Match {
    pub fn new(
        resting_order_id: u64,
        incoming_order_id: u64,
        incoming_side: Side,
        quantity: u64,
        price: u64,
    ) -> Self {
        Self {
            resting_order_id,
            incoming_order_id,
            incoming_side,
            quantity,
            price,
        }
    }

    /// The order whose level supplied the liquidity
    #[inline]
    pub fn resting_order_id(&self) -> u64 {
        self.resting_order_id
    }

    #[inline]
    pub fn incoming_order_id(&self) -> u64 {
        self.incoming_order_id
    }

    #[inline]
    pub fn incoming_side(&self) -> Side {
        self.incoming_side
    }

    /// Quantity filled (fixed-point)
    #[inline]
    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Execution price (fixed-point)
    #[inline]
    pub fn price(&self) -> u64 {
        self.price
    }

    /// Id of the sell-side order in this execution
    pub fn ask_order_id(&self) -> u64 {
        match self.incoming_side {
            Side::Buy => self.resting_order_id,
            Side::Sell => self.incoming_order_id,
        }
    }

    /// Id of the buy-side order in this execution
    pub fn bid_order_id(&self) -> u64 {
        match self.incoming_side {
            Side::Buy => self.incoming_order_id,
            Side::Sell => self.resting_order_id,
        }
    }
}
