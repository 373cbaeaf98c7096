//! # Factor Resolver
//!
//! Threshold step functions used by the calculators.
//!
//! ## How a Step Function Resolves
//! ```text
//! thresholds:      [   3   ,   7   ]
//! factors:         [ 0.85  , 1.00  ]   above: 1.25
//!
//!   value ≤ 3  ──► 0.85
//!   value ≤ 7  ──► 1.00
//!   otherwise  ──► 1.25
//! ```
//!
//! Thresholds are scanned in the order given and the first one the value does
//! not exceed wins. They are expected to be ascending but are never sorted
//! here; an unsorted table resolves by declaration order.

/// A step function with `N` thresholds and `N + 1` factors.
///
/// The catch-all factor is a separate field, so the `N + 1` shape is
/// guaranteed by the type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepFactors<const N: usize> {
    thresholds: [f64; N],
    factors: [f64; N],
    above: f64,
}

impl<const N: usize> StepFactors<N> {
    /// Creates a step function.
    ///
    /// ## Arguments
    /// * `thresholds` - Upper bounds, expected ascending
    /// * `factors` - Factor returned when the value is `<=` the paired threshold
    /// * `above` - Factor returned when the value exceeds every threshold
    pub const fn new(thresholds: [f64; N], factors: [f64; N], above: f64) -> Self {
        StepFactors {
            thresholds,
            factors,
            above,
        }
    }

    /// Resolves the factor for a value.
    pub fn resolve(&self, value: f64) -> f64 {
        self.thresholds
            .iter()
            .zip(self.factors.iter())
            .find(|(threshold, _)| value <= **threshold)
            .map(|(_, factor)| *factor)
            .unwrap_or(self.above)
    }
}

// =============================================================================
// Calculator Tables
// =============================================================================

/// Demand thresholds shared by every calculator.
pub const DEMAND_THRESHOLDS: [f64; 2] = [3.0, 7.0];

/// Inventory thresholds used by the default calculator.
pub const INVENTORY_THRESHOLDS: [f64; 2] = [10.0, 100.0];

/// Default calculator: low demand discounts, high demand premium.
pub const DEFAULT_DEMAND: StepFactors<2> = StepFactors::new(DEMAND_THRESHOLDS, [0.85, 1.00], 1.25);

/// Default calculator: scarce stock premium, overstock discount.
pub const DEFAULT_INVENTORY: StepFactors<2> =
    StepFactors::new(INVENTORY_THRESHOLDS, [1.15, 1.00], 0.90);

/// Aggressive calculator demand curve.
pub const AGGRESSIVE_DEMAND: StepFactors<2> =
    StepFactors::new(DEMAND_THRESHOLDS, [0.90, 1.10], 1.40);

/// Conservative calculator demand curve.
pub const CONSERVATIVE_DEMAND: StepFactors<2> =
    StepFactors::new(DEMAND_THRESHOLDS, [0.80, 0.95], 1.15);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_inclusive() {
        assert_eq!(DEFAULT_DEMAND.resolve(3.0), 0.85);
        assert_eq!(DEFAULT_DEMAND.resolve(7.0), 1.00);
        assert_eq!(DEFAULT_INVENTORY.resolve(10.0), 1.15);
        assert_eq!(DEFAULT_INVENTORY.resolve(100.0), 1.00);
    }

    #[test]
    fn test_between_and_above_thresholds() {
        assert_eq!(DEFAULT_DEMAND.resolve(1.0), 0.85);
        assert_eq!(DEFAULT_DEMAND.resolve(5.0), 1.00);
        assert_eq!(DEFAULT_DEMAND.resolve(8.0), 1.25);
        assert_eq!(DEFAULT_INVENTORY.resolve(0.0), 1.15);
        assert_eq!(DEFAULT_INVENTORY.resolve(50.0), 1.00);
        assert_eq!(DEFAULT_INVENTORY.resolve(101.0), 0.90);
    }

    #[test]
    fn test_negative_values_hit_first_factor() {
        assert_eq!(DEFAULT_INVENTORY.resolve(-5.0), 1.15);
    }

    #[test]
    fn test_unsorted_thresholds_resolve_in_declaration_order() {
        // 5 <= 7 matches the first pair even though 3 comes "before" 7 numerically.
        let unsorted = StepFactors::new([7.0, 3.0], [0.5, 0.6], 0.7);
        assert_eq!(unsorted.resolve(5.0), 0.5);
        assert_eq!(unsorted.resolve(2.0), 0.5);
        assert_eq!(unsorted.resolve(8.0), 0.7);
    }

    #[test]
    fn test_zero_thresholds_always_return_above() {
        let flat: StepFactors<0> = StepFactors::new([], [], 1.1);
        assert_eq!(flat.resolve(-100.0), 1.1);
        assert_eq!(flat.resolve(100.0), 1.1);
    }

    #[test]
    fn test_calculator_tables() {
        assert_eq!(AGGRESSIVE_DEMAND.resolve(2.0), 0.90);
        assert_eq!(AGGRESSIVE_DEMAND.resolve(6.0), 1.10);
        assert_eq!(AGGRESSIVE_DEMAND.resolve(9.0), 1.40);
        assert_eq!(CONSERVATIVE_DEMAND.resolve(2.0), 0.80);
        assert_eq!(CONSERVATIVE_DEMAND.resolve(6.0), 0.95);
        assert_eq!(CONSERVATIVE_DEMAND.resolve(9.0), 1.15);
    }
}
