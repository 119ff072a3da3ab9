//! Request handlers for the HTTP routes.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use crate::api::error::ApiError;
use crate::api::models::{
    MatchedOrder, MessageResponse, OrderBookData, PlaceOrderRequest, PlaceOrderResponse,
};
use crate::api::AppState;
use crate::exchange::{Market, PlaceOrder, Placement};
use crate::types::price::decimal_to_fixed;
use crate::types::Side;

pub async fn place_order(
    State(state): State<AppState>,
    payload: Result<Json<PlaceOrderRequest>, JsonRejection>,
) -> Result<Json<PlaceOrderResponse>, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let size = decimal_to_fixed(payload.size)
        .filter(|size| *size > 0)
        .ok_or_else(|| ApiError::BadRequest(format!("invalid size: {}", payload.size)))?;
    let price = payload
        .price
        .map(|p| decimal_to_fixed(p).ok_or_else(|| ApiError::BadRequest(format!("invalid price: {p}"))))
        .transpose()?;

    let market = Market::new(payload.market);
    let request = PlaceOrder {
        kind: payload.kind.into(),
        side: Side::from_bid(payload.bid),
        size,
        price,
    };

    let placement = state.exchange.place_order(&market, request)?;

    let response = match placement {
        Placement::Resting { order_id } => PlaceOrderResponse::Limit {
            msg: "limit order placed",
            order_id,
        },
        Placement::Filled { matches, .. } => PlaceOrderResponse::Market {
            matches: matches.iter().map(MatchedOrder::from).collect(),
        },
    };

    Ok(Json(response))
}

pub async fn get_book(
    State(state): State<AppState>,
    Path(market): Path<String>,
) -> Result<Json<OrderBookData>, ApiError> {
    let snapshot = state.exchange.book(&Market::new(market))?;
    Ok(Json(OrderBookData::from(&snapshot)))
}

pub async fn cancel_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let order_id: u64 = id
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid order id: {id}")))?;

    state.exchange.cancel_order(order_id)?;

    Ok(Json(MessageResponse { msg: "order cancelled" }))
}
