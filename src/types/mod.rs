//! Core data types for the order book
//!
//! ## Types
//!
//! - [`Order`]: A resting or incoming intent to trade
//! - [`Side`]: Buy (bid) or Sell (ask)
//! - [`OrderType`]: Limit or Market
//! - [`Match`]: One execution between an incoming and a resting order
//!
//! ## Fixed-Point Arithmetic
//!
//! All prices and quantities are stored as `u64` scaled by 10^8.
//! Example: 10000.5 is stored as 1_000_050_000_000u64

mod order;
mod execution;
pub mod price;

pub use order::{Order, Side, OrderType};
pub use execution::Match;
