//! # Domain Types
//!
//! Core domain types used throughout Dynprice.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │ PricingRequest  │──►│   PriceQuote    │──►│ NewPricingHistory   │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  cost_price     │   │  dynamic_price  │   │  strategy_used      │   │
//! │  │  demand_score   │   │  base_price     │   │  (requested name)   │   │
//! │  │  inventory      │   │  strategy       │   └──────────┬──────────┘   │
//! │  │  competitor_... │   │  (executed)     │              │ append       │
//! │  └─────────────────┘   └─────────────────┘              ▼              │
//! │                                              ┌─────────────────────┐   │
//! │  ┌─────────────────┐   ┌─────────────────┐   │PricingHistoryRecord │   │
//! │  │ CustomerSegment │   │ CompetitorPrice │   │  id, timestamp      │   │
//! │  │ premium/budget  │   │ (disjoint table)│   │  conversion_rate=0  │   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;
use ts_rs::TS;

use crate::strategy::Strategy;
use crate::DEFAULT_SEGMENT;

// =============================================================================
// Pricing Request
// =============================================================================

/// Inputs for a single price calculation.
///
/// ## Validation
/// None. Values are taken as given; a zero `competitor_price` is the only
/// input that makes a calculation fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingRequest {
    /// Product identifier.
    pub product_id: String,

    /// Unit cost.
    pub cost_price: f64,

    /// Demand intensity, conventionally 1 (low) to 10 (high).
    pub demand_score: i32,

    /// Units in stock.
    pub inventory: i64,

    /// Reference competitor price.
    pub competitor_price: f64,

    /// Segment tag: premium, standard, budget, loyalty. Missing or `null`
    /// means standard.
    #[serde(default = "default_segment", deserialize_with = "segment_or_default")]
    pub customer_segment: String,

    /// Seasonal multiplier. Missing or `null` means 1.0.
    #[serde(default = "default_seasonality", deserialize_with = "seasonality_or_default")]
    pub seasonality_factor: f64,
}

fn default_segment() -> String {
    DEFAULT_SEGMENT.to_string()
}

fn default_seasonality() -> f64 {
    1.0
}

fn segment_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_segment))
}

fn seasonality_or_default<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_else(default_seasonality))
}

impl PricingRequest {
    /// Creates a request for the standard segment with neutral seasonality.
    pub fn new(
        product_id: impl Into<String>,
        cost_price: f64,
        demand_score: i32,
        inventory: i64,
        competitor_price: f64,
    ) -> Self {
        PricingRequest {
            product_id: product_id.into(),
            cost_price,
            demand_score,
            inventory,
            competitor_price,
            customer_segment: default_segment(),
            seasonality_factor: default_seasonality(),
        }
    }

    /// Sets the customer segment tag.
    pub fn with_segment(mut self, segment: impl Into<String>) -> Self {
        self.customer_segment = segment.into();
        self
    }

    /// Sets the seasonality multiplier.
    pub fn with_seasonality(mut self, factor: f64) -> Self {
        self.seasonality_factor = factor;
        self
    }

    /// Parses the segment tag.
    pub fn segment(&self) -> CustomerSegment {
        CustomerSegment::from_tag(&self.customer_segment)
    }
}

// =============================================================================
// Customer Segment
// =============================================================================

/// Customer segment, resolved from the request's tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerSegment {
    Premium,
    Standard,
    Budget,
    Loyalty,
    /// Any tag not listed above. Priced like `Standard`.
    Unrecognized(String),
}

impl CustomerSegment {
    /// Parses a segment tag. Matching is exact and case-sensitive.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "premium" => CustomerSegment::Premium,
            "standard" => CustomerSegment::Standard,
            "budget" => CustomerSegment::Budget,
            "loyalty" => CustomerSegment::Loyalty,
            other => CustomerSegment::Unrecognized(other.to_string()),
        }
    }

    /// Price multiplier applied by the default calculator.
    pub fn factor(&self) -> f64 {
        match self {
            CustomerSegment::Premium => 1.20,
            CustomerSegment::Standard => 1.00,
            CustomerSegment::Budget => 0.85,
            CustomerSegment::Loyalty => 0.90,
            CustomerSegment::Unrecognized(tag) => {
                warn!(segment = %tag, "Unknown customer segment, applying neutral factor");
                1.00
            }
        }
    }
}

// =============================================================================
// Price Quote
// =============================================================================

/// Result of a calculation, returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceQuote {
    pub product_id: String,

    /// Final clamped price, rounded to cents.
    pub dynamic_price: f64,

    /// Cost plus markup before any factor, rounded to cents. Never clamped.
    pub base_price: f64,

    /// Calculator that actually ran.
    pub strategy: Strategy,
}

// =============================================================================
// Pricing History
// =============================================================================

/// Append payload handed to a [`crate::HistoryRecorder`].
///
/// Identity and timestamp are assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPricingHistory {
    pub product_id: String,
    pub original_price: f64,
    pub dynamic_price: f64,
    pub demand_score: i32,
    pub inventory: i64,
    pub competitor_price: f64,
    /// Strategy name as the caller requested it, even if it fell back.
    pub strategy_used: String,
}

impl NewPricingHistory {
    /// Builds the record for a finished calculation.
    pub fn from_quote(request: &PricingRequest, quote: &PriceQuote, requested_strategy: &str) -> Self {
        NewPricingHistory {
            product_id: request.product_id.clone(),
            original_price: quote.base_price,
            dynamic_price: quote.dynamic_price,
            demand_score: request.demand_score,
            inventory: request.inventory,
            competitor_price: request.competitor_price,
            strategy_used: requested_strategy.to_string(),
        }
    }
}

/// A persisted, immutable history row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct PricingHistoryRecord {
    /// Unique identifier (UUID v4).
    pub id: String,

    pub product_id: String,

    /// When the calculation was recorded (UTC).
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,

    /// Base price of the quote.
    pub original_price: f64,

    pub dynamic_price: f64,
    pub demand_score: i32,
    pub inventory: i64,
    pub competitor_price: f64,
    pub strategy_used: String,

    /// Filled in by an external process, 0 at creation.
    pub conversion_rate: f64,

    /// Filled in by an external process, 0 at creation.
    pub revenue_generated: f64,
}

// =============================================================================
// Competitor Prices
// =============================================================================

/// A competitor price observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct CompetitorPrice {
    pub id: String,
    pub product_id: String,
    pub competitor_name: String,
    pub price: f64,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
    pub is_active: bool,
}

// =============================================================================
// Analytics
// =============================================================================

/// Look-back window used when a caller does not give one.
pub const DEFAULT_ANALYTICS_DAYS: i64 = 7;

/// Which history rows an analytics query covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsWindow {
    /// Restrict to one product; `None` covers all products.
    #[serde(default)]
    pub product_id: Option<String>,

    /// Days to look back from now.
    #[serde(default = "default_analytics_days")]
    pub days: i64,
}

fn default_analytics_days() -> i64 {
    DEFAULT_ANALYTICS_DAYS
}

impl Default for AnalyticsWindow {
    fn default() -> Self {
        AnalyticsWindow {
            product_id: None,
            days: DEFAULT_ANALYTICS_DAYS,
        }
    }
}

impl AnalyticsWindow {
    /// Earliest timestamp inside the window.
    ///
    /// A window too large to represent starts at the beginning of time.
    pub fn since(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        chrono::Duration::try_days(self.days)
            .and_then(|span| now.checked_sub_signed(span))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// Aggregate pricing metrics over a time window.
///
/// Every field is zero when the window holds no rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PerformanceMetrics {
    pub average_price: f64,
    pub price_changes: i64,
    pub conversion_rate: f64,
    pub revenue_impact: f64,
    pub competitor_price_avg: f64,
}

/// Daily average price and calculation count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct PriceTrendPoint {
    /// UTC date, `YYYY-MM-DD`.
    pub date: String,
    pub price: f64,
    pub sales: i64,
}

/// Analytics response: metrics plus a date-ordered trend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingPerformance {
    pub metrics: PerformanceMetrics,
    pub price_trend: Vec<PriceTrendPoint>,
}

// =============================================================================
// Unit Tests
// =============================================================================
