//! Error responses of the HTTP API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::error::BookError;
use crate::exchange::ExchangeError;

/// Errors surfaced to HTTP clients
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Market not found: {0}")]
    MarketNotFound(String),

    #[error("Order not found: {0}")]
    OrderNotFound(u64),

    #[error("Insufficient liquidity: {0}")]
    InsufficientLiquidity(String),
}

impl From<ExchangeError> for ApiError {
    fn from(err: ExchangeError) -> Self {
        match err {
            ExchangeError::UnknownMarket { market } => ApiError::MarketNotFound(market.to_string()),
            ExchangeError::MissingPrice => ApiError::BadRequest("limit orders require a price".into()),
            ExchangeError::Book(BookError::OrderNotFound { order_id }) => ApiError::OrderNotFound(order_id),
            ExchangeError::Book(e @ BookError::InsufficientLiquidity { .. }) => {
                ApiError::InsufficientLiquidity(e.to_string())
            }
            ExchangeError::Book(e) => ApiError::BadRequest(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, code) = match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::MarketNotFound(_) => (StatusCode::NOT_FOUND, "MARKET_NOT_FOUND"),
            ApiError::OrderNotFound(_) => (StatusCode::NOT_FOUND, "ORDER_NOT_FOUND"),
            ApiError::InsufficientLiquidity(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INSUFFICIENT_LIQUIDITY")
            }
        };

        let body = Json(json!({
            "error": code,
            "message": message
        }));

        (status, body).into_response()
    }
}
