//! Fixed-point price and size conversion.
//!
//! The book stores every price and size as a `u64` scaled by 10^8, so
//! level volumes are exact sums. Decimal values only exist at the edges:
//! requests are parsed into fixed-point here and responses are rendered
//! back out.
//!
//! ```
//! use limit_exchange::types::price::{to_fixed, from_fixed};
//!
//! let price = to_fixed("10000").unwrap();
//! assert_eq!(price, 1_000_000_000_000);
//! assert_eq!(from_fixed(price), "10000.00000000");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Scaling factor for fixed-point values: 10^8 (8 decimal places)
pub const SCALE: u64 = 100_000_000;

/// Parse a decimal string into fixed-point.
///
/// Returns `None` for unparsable, negative, or out-of-range input.
pub fn to_fixed(s: &str) -> Option<u64> {
    let decimal = Decimal::from_str(s).ok()?;
    decimal_to_fixed(decimal)
}

/// Convert a `Decimal` to fixed-point, rounding to 8 decimal places.
///
/// Returns `None` if the value is negative or does not fit in a `u64`.
pub fn decimal_to_fixed(d: Decimal) -> Option<u64> {
    if d.is_sign_negative() && !d.is_zero() {
        return None;
    }

    let scaled = d.checked_mul(Decimal::from(SCALE))?;
    scaled.round_dp(0).to_u64()
}

/// Convert fixed-point back to a `Decimal`
pub fn fixed_to_decimal(value: u64) -> Decimal {
    Decimal::from(value) / Decimal::from(SCALE)
}

/// Render fixed-point with all 8 decimal places
pub fn from_fixed(value: u64) -> String {
    format!("{:.8}", fixed_to_decimal(value))
}

// ============================================================================
// Unit Tests
// ============================================================================
