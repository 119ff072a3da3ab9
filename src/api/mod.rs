//! HTTP/JSON transport over the [`Exchange`].
//!
//! Routes:
//! - `POST /order` place a limit or market order
//! - `GET /book/:market` flattened book for a market
//! - `DELETE /order/:id` cancel a resting order
//!
//! Handlers only decode requests, call the exchange, and encode results.

pub mod error;
pub mod handlers;
pub mod models;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::exchange::Exchange;

pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub exchange: Arc<Exchange>,
}

impl AppState {
    pub fn new(exchange: Exchange) -> Self {
        Self {
            exchange: Arc::new(exchange),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/order", post(handlers::place_order))
        .route("/order/:id", delete(handlers::cancel_order))
        .route("/book/:market", get(handlers::get_book))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
