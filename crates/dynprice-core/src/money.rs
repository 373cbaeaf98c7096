//! # Money Module
//!
//! Rounding helpers for prices.
//!
//! ## Why Floats Here?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Pricing works in multipliers (1.05, 0.85, 1.20 ...) applied to a      │
//! │  cost price. The chain of factors is computed in f64 and only the      │
//! │  final figures are rounded to cents:                                    │
//! │                                                                         │
//! │    base  = 13.000000000000002  →  13.00                                │
//! │    price = 13.650000000000002  →  13.65                                │
//! │                                                                         │
//! │  Rounding happens ONCE, at the edge of the calculator, never between   │
//! │  factors.                                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding Rule
//! The stored double is converted to its exact decimal value and rounded
//! there, ties to even. Scaling by 100 in f64 first would add a second
//! rounding error: `112.5 × 1.05` is stored just below `118.125` and must
//! round down to `118.12`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept in a price.
pub const CENT_DECIMALS: u32 = 2;

/// Rounds a price to two decimal places (exact value, ties to even).
///
/// Non-finite or out-of-range values are returned unchanged.
///
/// ## Example
/// ```rust
/// use dynprice_core::money::round_to_cents;
///
/// assert_eq!(round_to_cents(13.650000000000002), 13.65);
/// assert_eq!(round_to_cents(112.5 * 1.05), 118.12);
/// assert_eq!(round_to_cents(0.125), 0.12);
/// ```
pub fn round_to_cents(value: f64) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|exact| exact.round_dp_with_strategy(CENT_DECIMALS, RoundingStrategy::MidpointNearestEven))
        .and_then(|rounded| rounded.to_f64())
        .unwrap_or(value)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(10.0), 10.0);
        assert_eq!(round_to_cents(10.004), 10.0);
        assert_eq!(round_to_cents(10.006), 10.01);
        assert_eq!(round_to_cents(-3.338), -3.34);
    }

    #[test]
    fn test_float_noise_is_removed() {
        // 0.1 + 0.2 = 0.30000000000000004
        assert_eq!(round_to_cents(0.1 + 0.2), 0.3);
    }

    #[test]
    fn test_rounds_the_stored_value() {
        // Stored just below the half cent, so they round down.
        assert_eq!(round_to_cents(112.5 * 1.05), 118.12);
        assert_eq!(round_to_cents(0.06 * 1.25), 0.07);
        // 1.005 is stored as 1.00499999999999989...
        assert_eq!(round_to_cents(1.005), 1.0);
    }

    #[test]
    fn test_exact_ties_go_to_even() {
        assert_eq!(round_to_cents(0.125), 0.12);
        assert_eq!(round_to_cents(0.375), 0.38);
        assert_eq!(round_to_cents(11.875), 11.88);
        assert_eq!(round_to_cents(-0.125), -0.12);
    }

    #[test]
    fn test_non_finite_passes_through() {
        assert!(round_to_cents(f64::NAN).is_nan());
        assert_eq!(round_to_cents(f64::INFINITY), f64::INFINITY);
    }
}
