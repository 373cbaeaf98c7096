//! # HTTP Handlers
//!
//! ```text
//! POST /calculate-price?strategy=       pricing::calculate_price
//! GET  /analytics/pricing-performance   analytics::pricing_performance
//! POST /competitor-prices/update        competitors::update_competitor_prices
//! GET  /health                          health::health
//! ```

pub mod analytics;
pub mod competitors;
pub mod health;
pub mod pricing;
