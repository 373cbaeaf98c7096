//! # Dynprice Pricing API
//!
//! JSON-over-HTTP surface for the pricing engine.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Pricing API Routes                              │
//! │                                                                         │
//! │  ┌────────────────────────┐  ┌──────────────────────────────────────┐  │
//! │  │ POST /calculate-price  │  │ GET /analytics/pricing-performance   │  │
//! │  │                        │  │                                      │  │
//! │  │ • ?strategy=name       │  │ • ?product_id=  ?days=7              │  │
//! │  │ • engine.calculate     │  │ • metrics + daily trend              │  │
//! │  └────────────────────────┘  └──────────────────────────────────────┘  │
//! │                                                                         │
//! │  ┌────────────────────────┐  ┌──────────────────────────────────────┐  │
//! │  │ POST /competitor-      │  │ GET /health                          │  │
//! │  │      prices/update     │  │                                      │  │
//! │  │ • background monitor   │  │ • database connected/disconnected    │  │
//! │  └────────────────────────┘  └──────────────────────────────────────┘  │
//! │                                                                         │
//! │  Layers: permissive CORS, HTTP trace                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `PORT` - Listen port (default 8000)
//! - `DATABASE_PATH` - SQLite file (default `pricing.db`)
//! - `DB_MAX_CONNECTIONS` - Pool size (default 5)
//! - `RUST_LOG` - Log filter

pub mod config;
pub mod error;
pub mod handlers;
pub mod monitor;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult, ErrorBody, ErrorCode};
pub use state::AppState;

/// Builds the router with all routes and layers.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/calculate-price", post(handlers::pricing::calculate_price))
        .route(
            "/analytics/pricing-performance",
            get(handlers::analytics::pricing_performance),
        )
        .route(
            "/competitor-prices/update",
            post(handlers::competitors::update_competitor_prices),
        )
        .route("/health", get(handlers::health::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
