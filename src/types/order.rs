//! Order types for the limit order book.
//!
//! ## Identity
//!
//! Order ids come from a process-wide monotonically increasing counter.
//! Ids are never reused, so an id doubles as the order's creation
//! sequence key and is unique across every market in the process.
//!
//! ## SSZ Serialization
//!
//! `Order` derives `SimpleSerialize` so resting orders have a canonical
//! byte encoding (used for the book digest).
//!
//! ## Fixed-Point Representation
//!
//! Prices and quantities are stored as u64 scaled by 10^8 (see
//! [`crate::types::price::SCALE`]).

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use ssz_rs::prelude::*;

static NEXT_ORDER_ID: AtomicU64 = AtomicU64::new(1);

fn next_order_id() -> u64 {
    NEXT_ORDER_ID.fetch_add(1, Ordering::Relaxed)
}

fn now_nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Buy (bid) or Sell (ask)
///
/// Represented as u8 for SSZ compatibility:
/// - Buy = 0
/// - Sell = 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Buy order (bid) - rests on the bid side, takes from asks
    #[default]
    Buy,
    /// Sell order (ask) - rests on the ask side, takes from bids
    Sell,
}

impl Side {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            Side::Buy => 0,
            Side::Sell => 1,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Side::Buy),
            1 => Some(Side::Sell),
            _ => None,
        }
    }

    /// Build a side from the wire's `bid` flag
    pub fn from_bid(bid: bool) -> Self {
        if bid {
            Side::Buy
        } else {
            Side::Sell
        }
    }

    pub fn is_bid(self) -> bool {
        self == Side::Buy
    }

    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

// ============================================================================
// OrderType enum
// ============================================================================

/// How an incoming order is handled by the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderType {
    /// Rests at its price until matched or cancelled. Never crosses on entry.
    Limit,
    /// Fills immediately against the opposite side, or not at all.
    Market,
}

// ============================================================================
// Order struct
// ============================================================================

/// A single intent to buy or sell a quantity.
///
/// `remaining` is monotonically non-increasing and is only written by the
/// matching step inside the book. `price` is zero until the order rests on
/// a price level; market orders never get one.
///
/// ## Example
///
/// ```
/// use limit_exchange::types::{Order, Side};
///
/// // Sell 20.0 units
/// let order = Order::new(Side::Sell, 2_000_000_000);
/// assert_eq!(order.side(), Side::Sell);
/// assert_eq!(order.remaining, 2_000_000_000);
/// assert!(!order.is_filled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct Order {
    /// Unique order identifier, also the creation sequence key
    pub id: u64,

    /// Order side as u8 (0=Buy, 1=Sell)
    pub side_raw: u8,

    /// Resting price in fixed-point (0 while not resting)
    pub price: u64,

    /// Original quantity in fixed-point
    pub quantity: u64,

    /// Remaining quantity, decremented as the order is matched
    pub remaining: u64,

    /// Creation time, nanoseconds since the Unix epoch
    pub timestamp: u64,
}

impl Order {
    /// Create a new order with a fresh id
    ///
    /// # Arguments
    ///
    /// * `side` - Buy or Sell
    /// * `quantity` - Size in fixed-point (scaled by 10^8)
    pub fn new(side: Side, quantity: u64) -> Self {
        Self {
            id: next_order_id(),
            side_raw: side.to_u8(),
            price: 0,
            quantity,
            remaining: quantity,
            timestamp: now_nanos(),
        }
    }

    /// Get the order side
    pub fn side(&self) -> Side {
        Side::from_u8(self.side_raw).unwrap_or(Side::Buy)
    }

    /// Check if the order is fully filled
    pub fn is_filled(&self) -> bool {
        self.remaining == 0
    }

    /// Get the filled quantity
    pub fn filled_quantity(&self) -> u64 {
        self.quantity.saturating_sub(self.remaining)
    }

    /// Fill a portion of this order
    ///
    /// Returns the quantity actually filled, which is capped at `remaining`.
    pub(crate) fn fill(&mut self, fill_qty: u64) -> u64 {
        let actual_fill = fill_qty.min(self.remaining);
        self.remaining -= actual_fill;
        actual_fill
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
