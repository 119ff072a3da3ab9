//! # Limit Exchange
//!
//! A single-market limit order book with price-time priority, and a thin
//! HTTP/JSON service that hosts one book per market.
//!
//! ## Architecture
//!
//! - **Types**: `Order`, `Side`, `Match`, fixed-point conversion
//! - **OrderBook**: slab-backed price levels, FIFO matching, O(1) cancel lookup
//! - **Exchange**: market routing and one lock per book
//! - **API**: axum handlers that decode requests into book calls
//!
//! ## Design Principles
//!
//! 1. **No Floating Point in the book**: prices and sizes are `u64` scaled by 10^8
//! 2. **Atomic operations**: a failed placement leaves the book untouched
//! 3. **Synchronous core**: the book never blocks or awaits

/// Core data types: Order, Side, Match
pub mod types;

/// Order book: price levels and matching
pub mod orderbook;

/// Book errors
pub mod error;

/// Multi-market front with per-market locking
pub mod exchange;

/// HTTP transport
pub mod api;

pub mod config;
pub mod telemetry;

pub use types::{Match, Order, OrderType, Side};
pub use orderbook::{BookSnapshot, Limit, OrderBook, OrderNode, RestingOrder};
pub use error::BookError;
pub use exchange::{Exchange, ExchangeError, Market, PlaceOrder, Placement};
