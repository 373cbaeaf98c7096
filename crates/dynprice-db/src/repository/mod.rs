//! # Repository Module
//!
//! Database repository implementations for Dynprice.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Layout                                    │
//! │                                                                         │
//! │  PricingHistoryRepository   (writer: one row per calculation)          │
//! │  ├── append(&self, entry)        ← also HistoryRecorder::record        │
//! │  ├── get_by_id(&self, id)                                              │
//! │  └── list_for_product(&self, product_id, limit)                        │
//! │                                                                         │
//! │  CompetitorPriceRepository  (writer: competitor monitor task)          │
//! │  ├── insert(&self, product_id, competitor, price)                      │
//! │  └── average_since(&self, since)                                       │
//! │                                                                         │
//! │  AnalyticsRepository        (read only, aggregates both tables)        │
//! │  └── pricing_performance(&self, window)                                │
//! │                                                                         │
//! │  The two writers touch disjoint tables; no ordering between them.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod analytics;
pub mod competitor;
pub mod history;
