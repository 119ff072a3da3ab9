//! Errors reported by the order book.
//!
//! Every variant is recoverable: the operation that returned it left the
//! book exactly as it was.

use thiserror::Error;

use crate::types::Side;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookError {
    /// The opposite side cannot absorb the whole market order
    #[error("not enough volume [{available}] on the {side:?} side to fill order [{requested}]")]
    InsufficientLiquidity {
        side: Side,
        requested: u64,
        available: u64,
    },

    #[error("order {order_id} not found")]
    OrderNotFound { order_id: u64 },

    #[error("order {order_id} is already resting")]
    DuplicateOrderId { order_id: u64 },

    #[error("invalid quantity: {quantity}")]
    InvalidQuantity { quantity: u64 },

    /// Resting `size` more on `side` would overflow its total volume
    #[error("order size [{size}] would overflow the {side:?} side volume")]
    VolumeOverflow { side: Side, size: u64 },

    #[error("invalid price: {price}")]
    InvalidPrice { price: u64 },
}
