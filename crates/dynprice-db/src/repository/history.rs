//! # Pricing History Repository
//!
//! Append-only storage for calculation records.
//!
//! ## Append Session
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      One Append, One Connection                         │
//! │                                                                         │
//! │  append(entry)                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  pool.acquire()  ──► PoolConnection (scoped to this call)              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  INSERT INTO pricing_history (...)                                     │
//! │       │                                                                 │
//! │       ├── Ok  ──► drop(conn) ──► back to pool ──► Ok(record)           │
//! │       └── Err ──► drop(conn) ──► back to pool ──► Err(DbError)         │
//! │                                                                         │
//! │  A single INSERT is atomic: a failed append leaves no row behind.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rows are never updated from here. `conversion_rate` and
//! `revenue_generated` start at zero and belong to whatever process tracks
//! sales outcomes.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use dynprice_core::{HistoryRecorder, NewPricingHistory, PricingHistoryRecord, RecordError};

/// Repository for pricing history operations.
#[derive(Debug, Clone)]
pub struct PricingHistoryRepository {
    pool: SqlitePool,
}

impl PricingHistoryRepository {
    /// Creates a new PricingHistoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PricingHistoryRepository { pool }
    }

    /// Appends a calculation record, stamping id and timestamp.
    ///
    /// ## Returns
    /// The stored record.
    pub async fn append(&self, entry: &NewPricingHistory) -> DbResult<PricingHistoryRecord> {
        let record = PricingHistoryRecord {
            id: generate_history_id(),
            product_id: entry.product_id.clone(),
            timestamp: Utc::now(),
            original_price: entry.original_price,
            dynamic_price: entry.dynamic_price,
            demand_score: entry.demand_score,
            inventory: entry.inventory,
            competitor_price: entry.competitor_price,
            strategy_used: entry.strategy_used.clone(),
            conversion_rate: 0.0,
            revenue_generated: 0.0,
        };

        self.insert(&record).await?;
        Ok(record)
    }

    /// Inserts a fully formed record.
    ///
    /// `append` is the normal path; this one lets the seed tool backfill
    /// rows with past timestamps.
    pub async fn insert(&self, record: &PricingHistoryRecord) -> DbResult<()> {
        debug!(
            id = %record.id,
            product_id = %record.product_id,
            strategy_used = %record.strategy_used,
            "Appending pricing history"
        );

        // Scoped session: returned to the pool when `conn` drops, on every path.
        let mut conn = self.pool.acquire().await?;

        sqlx::query(
            r#"
            INSERT INTO pricing_history (
                id, product_id, timestamp,
                original_price, dynamic_price,
                demand_score, inventory, competitor_price,
                strategy_used, conversion_rate, revenue_generated
            ) VALUES (
                ?1, ?2, ?3,
                ?4, ?5,
                ?6, ?7, ?8,
                ?9, ?10, ?11
            )
            "#,
        )
        .bind(&record.id)
        .bind(&record.product_id)
        .bind(record.timestamp)
        .bind(record.original_price)
        .bind(record.dynamic_price)
        .bind(record.demand_score)
        .bind(record.inventory)
        .bind(record.competitor_price)
        .bind(&record.strategy_used)
        .bind(record.conversion_rate)
        .bind(record.revenue_generated)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Gets a history record by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<PricingHistoryRecord> {
        let record: Option<PricingHistoryRecord> = sqlx::query_as(
            r#"
            SELECT
                id, product_id, timestamp,
                original_price, dynamic_price,
                demand_score, inventory, competitor_price,
                strategy_used, conversion_rate, revenue_generated
            FROM pricing_history
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        record.ok_or_else(|| DbError::not_found("PricingHistory", id))
    }

    /// Lists the newest records for a product.
    pub async fn list_for_product(
        &self,
        product_id: &str,
        limit: i64,
    ) -> DbResult<Vec<PricingHistoryRecord>> {
        let records: Vec<PricingHistoryRecord> = sqlx::query_as(
            r#"
            SELECT
                id, product_id, timestamp,
                original_price, dynamic_price,
                demand_score, inventory, competitor_price,
                strategy_used, conversion_rate, revenue_generated
            FROM pricing_history
            WHERE product_id = ?1
            ORDER BY timestamp DESC, rowid DESC
            LIMIT ?2
            "#,
        )
        .bind(product_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Counts all history rows (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pricing_history")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl HistoryRecorder for PricingHistoryRepository {
    async fn record(&self, entry: NewPricingHistory) -> Result<(), RecordError> {
        self.append(&entry).await?;
        Ok(())
    }
}

/// Generates a new history record ID.
pub fn generate_history_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use dynprice_core::{PricingEngine, PricingError, PricingRequest};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn sample_entry(product_id: &str) -> NewPricingHistory {
        NewPricingHistory {
            product_id: product_id.to_string(),
            original_price: 13.0,
            dynamic_price: 13.65,
            demand_score: 5,
            inventory: 50,
            competitor_price: 20.0,
            strategy_used: "default".to_string(),
        }
    }

    #[tokio::test]
    async fn test_append_and_read_back() {
        let db = test_db().await;
        let repo = db.history();

        let stored = repo.append(&sample_entry("SKU-1")).await.unwrap();
        let fetched = repo.get_by_id(&stored.id).await.unwrap();

        assert_eq!(fetched, stored);
        assert_eq!(fetched.conversion_rate, 0.0);
        assert_eq!(fetched.revenue_generated, 0.0);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_get_missing_record() {
        let db = test_db().await;
        let err = db.history().get_by_id("nope").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_for_product_newest_first() {
        let db = test_db().await;
        let repo = db.history();

        let first = repo.append(&sample_entry("SKU-1")).await.unwrap();
        let second = repo.append(&sample_entry("SKU-1")).await.unwrap();
        repo.append(&sample_entry("SKU-2")).await.unwrap();

        let records = repo.list_for_product("SKU-1", 10).await.unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);

        assert_eq!(repo.list_for_product("SKU-1", 1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_calculate_persists_requested_strategy() {
        let db = test_db().await;
        let repo = db.history();
        let engine = PricingEngine::new();
        let request = PricingRequest::new("SKU-1", 10.0, 5, 50, 20.0);

        let quote = engine.calculate(&repo, &request, "turbo").await.unwrap();

        let records = repo.list_for_product("SKU-1", 10).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].strategy_used, "turbo");
        assert_eq!(records[0].dynamic_price, quote.dynamic_price);
        assert_eq!(records[0].original_price, quote.base_price);
        assert_eq!(quote.strategy.as_str(), "default");
    }

    #[tokio::test]
    async fn test_calculate_fails_when_store_is_closed() {
        let db = test_db().await;
        let repo = db.history();
        db.close().await;

        let engine = PricingEngine::new();
        let request = PricingRequest::new("SKU-1", 10.0, 5, 50, 20.0);
        let err = engine.calculate(&repo, &request, "default").await.unwrap_err();

        match err {
            PricingError::StorageWriteFailure(source) => {
                assert!(matches!(
                    source.downcast_ref::<DbError>(),
                    Some(DbError::ConnectionFailed(_))
                ));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failed_append_leaves_no_row() {
        let db = test_db().await;
        let repo = db.history();

        let stored = repo.append(&sample_entry("SKU-1")).await.unwrap();

        // Same id again violates the primary key.
        let err = repo.insert(&stored).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
