//! JSON shapes of the HTTP API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::orderbook::{BookSnapshot, RestingOrder};
use crate::types::price::fixed_to_decimal;
use crate::types::{Match, OrderType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderKind {
    Limit,
    Market,
}

impl From<OrderKind> for OrderType {
    fn from(kind: OrderKind) -> Self {
        match kind {
            OrderKind::Limit => OrderType::Limit,
            OrderKind::Market => OrderType::Market,
        }
    }
}

/// `POST /order` body. `size` and `price` accept JSON numbers or numeric strings.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceOrderRequest {
    pub market: String,
    #[serde(rename = "type")]
    pub kind: OrderKind,
    pub bid: bool,
    pub size: Decimal,
    #[serde(default)]
    pub price: Option<Decimal>,
}

/// One execution, seen from the incoming order: `id` is the counterparty
#[derive(Debug, Clone, Serialize)]
pub struct MatchedOrder {
    pub id: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub size: Decimal,
}

impl From<&Match> for MatchedOrder {
    fn from(m: &Match) -> Self {
        Self {
            id: m.resting_order_id(),
            price: fixed_to_decimal(m.price()),
            size: fixed_to_decimal(m.quantity()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PlaceOrderResponse {
    Limit { msg: &'static str, order_id: u64 },
    Market { matches: Vec<MatchedOrder> },
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub msg: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookOrder {
    pub id: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub size: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub bid: bool,
    pub timestamp: u64,
}

impl From<&RestingOrder> for BookOrder {
    fn from(order: &RestingOrder) -> Self {
        Self {
            id: order.order_id,
            size: fixed_to_decimal(order.size),
            price: fixed_to_decimal(order.price),
            bid: order.side.is_bid(),
            timestamp: order.timestamp,
        }
    }
}

/// `GET /book/:market` body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderBookData {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_bid_volume: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_ask_volume: Decimal,
    pub asks: Vec<BookOrder>,
    pub bids: Vec<BookOrder>,
}

impl From<&BookSnapshot> for OrderBookData {
    fn from(snapshot: &BookSnapshot) -> Self {
        Self {
            total_bid_volume: fixed_to_decimal(snapshot.total_bid_volume),
            total_ask_volume: fixed_to_decimal(snapshot.total_ask_volume),
            asks: snapshot.asks.iter().map(BookOrder::from).collect(),
            bids: snapshot.bids.iter().map(BookOrder::from).collect(),
        }
    }
}
