//! # dynprice-db: Database Layer for Dynprice
//!
//! This crate provides database access for the Dynprice system.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Dynprice Data Flow                               │
//! │                                                                         │
//! │  POST /calculate-price                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PricingEngine::calculate(&db.history(), ...)   (dynprice-core)        │
//! │       │                                                                 │
//! │       │ HistoryRecorder::record                                         │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    dynprice-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌──────────────────┐   ┌─────────────┐  │   │
//! │  │   │   Database    │    │   Repositories   │   │ Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                  │   │ (embedded)  │  │   │
//! │  │   │               │    │ PricingHistory   │   │ 001_history │  │   │
//! │  │   │ SqlitePool    │◄───│ CompetitorPrice  │   │ 002_compet. │  │   │
//! │  │   └───────────────┘    └──────────────────┘   └─────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (WAL mode)                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`pool`] - Connection pool and `Database` handle
//! - [`migrations`] - Embedded schema migrations
//! - [`error`] - Database error types
//! - [`repository`] - History and competitor price repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dynprice_core::{PricingEngine, PricingRequest};
//! use dynprice_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("pricing.db")).await?;
//!
//! let engine = PricingEngine::new();
//! let request = PricingRequest::new("SKU-1", 10.0, 5, 50, 20.0);
//! let quote = engine.calculate(&db.history(), &request, "default").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use migrations::MigrationStatus;
pub use pool::{Database, DbConfig};

pub use repository::analytics::AnalyticsRepository;
pub use repository::competitor::CompetitorPriceRepository;
pub use repository::history::PricingHistoryRepository;
