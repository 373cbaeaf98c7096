//! # Error Types
//!
//! Domain-specific error types for dynprice-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  dynprice-core errors (this file)                                      │
//! │  └── PricingError     - Calculation and recording failures             │
//! │                                                                         │
//! │  dynprice-db errors (separate crate)                                   │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  pricing-api errors (in app)                                           │
//! │  └── ApiError         - What HTTP clients see (serialized)             │
//! │                                                                         │
//! │  Flow: DbError → PricingError::StorageWriteFailure → ApiError          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! Unknown strategy names and unknown customer segments resolve to neutral
//! defaults. They are logged, never returned as errors.

use thiserror::Error;

use crate::engine::RecordError;

/// Pricing calculation errors.
#[derive(Debug, Error)]
pub enum PricingError {
    /// A calculation step could not produce a finite value.
    ///
    /// ## When This Occurs
    /// - `competitor_price` is zero in the default calculator, which divides
    ///   the base price by it to get the competitor ratio
    #[error("Arithmetic fault pricing {product_id}: {reason}")]
    ArithmeticFault { product_id: String, reason: String },

    /// The history append failed after the quote was computed.
    ///
    /// The quote is discarded. The wrapped error is the recorder's own error,
    /// untouched, so callers can downcast it.
    #[error("Failed to record pricing history: {0}")]
    StorageWriteFailure(#[source] RecordError),
}

impl PricingError {
    /// Creates the division fault raised for a zero competitor price.
    pub fn zero_competitor_price(product_id: impl Into<String>) -> Self {
        PricingError::ArithmeticFault {
            product_id: product_id.into(),
            reason: "competitor_price is zero, competitor ratio is undefined".to_string(),
        }
    }
}

/// Convenience type alias for Results with PricingError.
pub type PricingResult<T> = Result<T, PricingError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PricingError::zero_competitor_price("SKU-9");
        assert_eq!(
            err.to_string(),
            "Arithmetic fault pricing SKU-9: competitor_price is zero, competitor ratio is undefined"
        );
    }

    #[test]
    fn test_storage_failure_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err = PricingError::StorageWriteFailure(Box::new(io));

        assert_eq!(err.to_string(), "Failed to record pricing history: disk full");

        let source = std::error::Error::source(&err).expect("source is kept");
        assert!(source.downcast_ref::<std::io::Error>().is_some());
    }
}
