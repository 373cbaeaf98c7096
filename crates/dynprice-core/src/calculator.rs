//! # Price Calculators
//!
//! One calculator per [`Strategy`](crate::Strategy).
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Calculator Pipeline                                │
//! │                                                                         │
//! │  cost × (1 + markup + adjustment)             ──► base (rounded only)   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  × demand factor                              all strategies            │
//! │  × inventory × competitor × season × segment  default only              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  clamp: max(floor, min(price, ceiling))                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  round to cents                               ──► dynamic_price         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! | strategy     | markup adj. | floor       | ceiling           |
//! |--------------|-------------|-------------|-------------------|
//! | default      | +0.00       | cost × 1.10 | competitor × 1.20 |
//! | aggressive   | +0.10       | cost × 1.05 | competitor × 1.10 |
//! | conservative | -0.05       | cost × 1.15 | competitor × 0.95 |
//!
//! ## Inverted Bands
//! When the floor is above the ceiling, `min` runs first and `max` then
//! always returns the floor. The conservative calculator hits this whenever
//! `cost × 1.15 > competitor × 0.95`, and prices at the floor.

use tracing::debug;

use crate::error::{PricingError, PricingResult};
use crate::factor::{AGGRESSIVE_DEMAND, CONSERVATIVE_DEMAND, DEFAULT_DEMAND, DEFAULT_INVENTORY};
use crate::markup::base_markup;
use crate::money::round_to_cents;
use crate::strategy::Strategy;
use crate::types::{PriceQuote, PricingRequest};

/// Competitor ratio above which the default calculator undercuts.
const RATIO_HIGH: f64 = 1.1;
/// Competitor ratio below which the default calculator marks up.
const RATIO_LOW: f64 = 0.9;

// =============================================================================
// Clamp Band
// =============================================================================

/// Price band a calculator's output is clamped into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampBand {
    pub floor: f64,
    pub ceiling: f64,
}

impl ClampBand {
    /// Band for a strategy, relative to cost and competitor price.
    pub fn for_strategy(strategy: Strategy, cost_price: f64, competitor_price: f64) -> Self {
        let (floor, ceiling) = match strategy {
            Strategy::Default => (1.10, 1.20),
            Strategy::Aggressive => (1.05, 1.10),
            Strategy::Conservative => (1.15, 0.95),
        };
        ClampBand {
            floor: cost_price * floor,
            ceiling: competitor_price * ceiling,
        }
    }

    /// True when the floor sits above the ceiling.
    pub fn is_inverted(&self) -> bool {
        self.floor > self.ceiling
    }

    /// `max(floor, min(price, ceiling))`. An inverted band yields the floor.
    pub fn apply(&self, price: f64) -> f64 {
        price.min(self.ceiling).max(self.floor)
    }
}

// =============================================================================
// Calculators
// =============================================================================

/// Full factor model.
///
/// ## Errors
/// [`PricingError::ArithmeticFault`] when `competitor_price` is zero.
pub fn default_price(request: &PricingRequest) -> PricingResult<PriceQuote> {
    let base = request.cost_price * (1.0 + base_markup(request.demand_score));
    let demand_factor = DEFAULT_DEMAND.resolve(f64::from(request.demand_score));
    let inventory_factor = DEFAULT_INVENTORY.resolve(request.inventory as f64);

    if request.competitor_price == 0.0 {
        return Err(PricingError::zero_competitor_price(&request.product_id));
    }
    let competitor_ratio = base / request.competitor_price;
    let competitor_factor = if competitor_ratio > RATIO_HIGH {
        0.95
    } else if competitor_ratio < RATIO_LOW {
        1.05
    } else {
        1.00
    };

    let segment_factor = request.segment().factor();

    let price = base
        * demand_factor
        * inventory_factor
        * competitor_factor
        * request.seasonality_factor
        * segment_factor;

    debug!(
        product_id = %request.product_id,
        base,
        demand_factor,
        inventory_factor,
        competitor_ratio,
        competitor_factor,
        segment_factor,
        seasonality = request.seasonality_factor,
        raw_price = price,
        "Default price factors"
    );

    Ok(finish(request, Strategy::Default, base, price))
}

/// Demand-only model with a 10 point markup premium.
pub fn aggressive_price(request: &PricingRequest) -> PriceQuote {
    let base = request.cost_price * (1.0 + base_markup(request.demand_score) + 0.10);
    let demand_factor = AGGRESSIVE_DEMAND.resolve(f64::from(request.demand_score));
    let price = base * demand_factor;

    debug!(product_id = %request.product_id, base, demand_factor, raw_price = price, "Aggressive price factors");

    finish(request, Strategy::Aggressive, base, price)
}

/// Demand-only model with a 5 point markup discount.
pub fn conservative_price(request: &PricingRequest) -> PriceQuote {
    let base = request.cost_price * (1.0 + base_markup(request.demand_score) - 0.05);
    let demand_factor = CONSERVATIVE_DEMAND.resolve(f64::from(request.demand_score));
    let price = base * demand_factor;

    debug!(product_id = %request.product_id, base, demand_factor, raw_price = price, "Conservative price factors");

    finish(request, Strategy::Conservative, base, price)
}

/// Clamps, rounds and packages a raw price.
fn finish(request: &PricingRequest, strategy: Strategy, base: f64, price: f64) -> PriceQuote {
    let band = ClampBand::for_strategy(strategy, request.cost_price, request.competitor_price);
    if band.is_inverted() {
        debug!(
            product_id = %request.product_id,
            %strategy,
            floor = band.floor,
            ceiling = band.ceiling,
            "Clamp band inverted, pricing at floor"
        );
    }

    PriceQuote {
        product_id: request.product_id.clone(),
        dynamic_price: round_to_cents(band.apply(price)),
        base_price: round_to_cents(base),
        strategy,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
