//! Order book for a single market.
//!
//! ## Components
//!
//! - [`OrderNode`]: `Order` plus linked-list pointers, stored in a slab
//! - [`Limit`]: FIFO queue of orders at one price, with cached volume
//! - [`OrderBook`]: both sides, the id index, placement/matching/cancel
//! - [`BookSnapshot`]: flattened read-only view for callers
//!
//! ## Complexity
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Place limit order | O(log L) |
//! | Cancel by id | O(log L) |
//! | Best bid/ask | O(log L) |
//! | Market order | O(k + m log L) |
//!
//! L = levels on a side, k = resting orders touched, m = levels emptied.
//!
//! ## Example
//!
//! ```
//! use limit_exchange::orderbook::OrderBook;
//! use limit_exchange::types::{Order, Side};
//!
//! let mut book = OrderBook::new();
//! let order = Order::new(Side::Buy, 400_000_000);
//! let id = order.id;
//!
//! book.place_limit_order(1_000_000_000_000, order).unwrap();
//! assert_eq!(book.best_bid(), Some(1_000_000_000_000));
//!
//! book.cancel_order(id).unwrap();
//! assert_eq!(book.bid_total_volume(), 0);
//! assert_eq!(book.bid_levels(), 0);
//! ```

pub mod node;
pub mod limit;
pub mod book;
pub mod snapshot;

pub use node::OrderNode;
pub use limit::{Limit, LevelFill};
pub use book::OrderBook;
pub use snapshot::{BookSnapshot, RestingOrder};
