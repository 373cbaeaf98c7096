//! # dynprice-core: Pure Pricing Logic for Dynprice
//!
//! This crate is the **heart** of Dynprice. It turns a product's cost,
//! demand, inventory, competitor price, customer segment and seasonality into
//! a recommended selling price, using pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Dynprice Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    pricing-api (axum)                           │   │
//! │  │   /calculate-price   /analytics/...   /competitor-prices/...    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ dynprice-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌────────────────┐   │   │
//! │  │   │  markup  │ │  factor  │ │ strategy │ │   calculator   │   │   │
//! │  │   │  table   │ │ resolver │ │   enum   │ │ default / aggr │   │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ │ / conservative │   │   │
//! │  │                                          └────────────────┘   │   │
//! │  │   engine: select → calculate → record (HistoryRecorder seam)   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 dynprice-db (Database Layer)                    │   │
//! │  │        SQLite history, competitor prices, analytics             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Request, quote, history and analytics types
//! - [`markup`] - Demand score → base markup table
//! - [`factor`] - Threshold step functions
//! - [`strategy`] - Strategy enum and name resolution
//! - [`calculator`] - The three price calculators
//! - [`engine`] - `calculate` entry point and the recorder seam
//! - [`money`] - Cent rounding
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use dynprice_core::{PricingEngine, PricingRequest, Strategy};
//!
//! let engine = PricingEngine::new();
//! let request = PricingRequest::new("SKU-1", 10.0, 5, 50, 20.0);
//!
//! let quote = engine.quote(&request, "default").unwrap();
//! assert_eq!(quote.base_price, 13.0);
//! assert_eq!(quote.dynamic_price, 13.65);
//! assert_eq!(quote.strategy, Strategy::Default);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod engine;
pub mod error;
pub mod factor;
pub mod markup;
pub mod money;
pub mod strategy;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use engine::{HistoryRecorder, PricingEngine, RecordError};
pub use error::{PricingError, PricingResult};
pub use strategy::{Strategy, StrategySelection};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Segment tag applied when a request omits `customer_segment`.
pub const DEFAULT_SEGMENT: &str = "standard";

/// Strategy name used when a caller does not ask for one.
pub const DEFAULT_STRATEGY: &str = "default";
