//! Multi-market front for the order books.
//!
//! Each market owns one [`OrderBook`] behind its own lock. Every book
//! operation runs start to finish while holding that lock, so placements
//! and cancellations on a market are serialized and no caller can observe
//! a market order half-way through a sweep. Book operations never block
//! or await, so the critical sections stay short.

use std::collections::HashMap;
use std::fmt;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, info, Level};

use crate::error::BookError;
use crate::orderbook::{BookSnapshot, OrderBook};
use crate::types::{Match, Order, OrderType, Side};

/// Opaque market identifier, e.g. `"ETH"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Market(String);

impl Market {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Market {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExchangeError {
    #[error("market {market} not found")]
    UnknownMarket { market: Market },

    #[error("limit orders require a price")]
    MissingPrice,

    #[error(transparent)]
    Book(#[from] BookError),
}

/// A decoded placement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceOrder {
    pub kind: OrderType,
    pub side: Side,
    /// Size in fixed-point
    pub size: u64,
    /// Limit price in fixed-point; ignored for market orders
    pub price: Option<u64>,
}

/// Outcome of a successful placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Limit order now resting on the book
    Resting { order_id: u64 },
    /// Market order fully executed
    Filled { order_id: u64, matches: Vec<Match> },
}

#[derive(Debug, Default)]
pub struct Exchange {
    books: HashMap<Market, Mutex<OrderBook>>,
}

impl Exchange {
    /// Create an exchange with one empty book per market
    pub fn new(markets: impl IntoIterator<Item = Market>, order_capacity: usize) -> Self {
        let books = markets
            .into_iter()
            .map(|market| (market, Mutex::new(OrderBook::with_capacity(order_capacity))))
            .collect::<HashMap<_, _>>();
        info!(markets = books.len(), order_capacity, "exchange initialised");
        Self { books }
    }

    /// Markets served, in name order
    pub fn markets(&self) -> Vec<&Market> {
        let mut markets: Vec<_> = self.books.keys().collect();
        markets.sort();
        markets
    }

    fn book_for(&self, market: &Market) -> Result<&Mutex<OrderBook>, ExchangeError> {
        self.books
            .get(market)
            .ok_or_else(|| ExchangeError::UnknownMarket { market: market.clone() })
    }

    /// Place a limit or market order on `market`
    pub fn place_order(&self, market: &Market, request: PlaceOrder) -> Result<Placement, ExchangeError> {
        let book = self.book_for(market)?;

        if request.size == 0 {
            return Err(BookError::InvalidQuantity { quantity: 0 }.into());
        }

        let mut order = Order::new(request.side, request.size);
        let order_id = order.id;

        match request.kind {
            OrderType::Limit => {
                let price = request.price.ok_or(ExchangeError::MissingPrice)?;
                let mut book = book.lock();
                book.place_limit_order(price, order)?;
                debug!(%market, order_id, "limit order placed");
                log_state_root(market, &book);
                Ok(Placement::Resting { order_id })
            }
            OrderType::Market => {
                let mut book = book.lock();
                let matches = book.place_market_order(&mut order)?;
                debug!(%market, order_id, matches = matches.len(), "market order executed");
                log_state_root(market, &book);
                Ok(Placement::Filled { order_id, matches })
            }
        }
    }

    /// Flattened view of `market`'s book
    pub fn book(&self, market: &Market) -> Result<BookSnapshot, ExchangeError> {
        Ok(self.book_for(market)?.lock().snapshot())
    }

    /// Hex digest of `market`'s resting orders
    pub fn state_root_hex(&self, market: &Market) -> Result<String, ExchangeError> {
        Ok(self.book_for(market)?.lock().state_root_hex())
    }

    /// Cancel a resting order wherever it rests.
    ///
    /// Order ids are unique across markets, so at most one book holds it.
    pub fn cancel_order(&self, order_id: u64) -> Result<(Market, Order), ExchangeError> {
        for (market, book) in &self.books {
            let mut book = book.lock();
            match book.cancel_order(order_id) {
                Ok(order) => {
                    debug!(%market, order_id, "order cancelled");
                    log_state_root(market, &book);
                    return Ok((market.clone(), order));
                }
                Err(BookError::OrderNotFound { .. }) => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(BookError::OrderNotFound { order_id }.into())
    }
}

/// Log the digest of `book` as left by the operation that still holds its lock
fn log_state_root(market: &Market, book: &OrderBook) {
    if tracing::enabled!(Level::DEBUG) {
        debug!(%market, state_root = %book.state_root_hex(), "book updated");
    }
}
