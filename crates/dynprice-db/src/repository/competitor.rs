//! # Competitor Price Repository
//!
//! Observations written by the competitor monitor and read by analytics.
//!
//! ## Table Usage
//! ```text
//! competitor monitor ──► insert()        ──► competitor_prices
//! analytics          ──► average_since() ◄── competitor_prices (active rows)
//! ```
//!
//! The analytics average spans all products; `list_for_product` is the
//! per-product view.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use dynprice_core::CompetitorPrice;

/// Repository for competitor price operations.
#[derive(Debug, Clone)]
pub struct CompetitorPriceRepository {
    pool: SqlitePool,
}

impl CompetitorPriceRepository {
    /// Creates a new CompetitorPriceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CompetitorPriceRepository { pool }
    }

    /// Records a new active observation stamped with the current time.
    pub async fn insert(
        &self,
        product_id: &str,
        competitor_name: &str,
        price: f64,
    ) -> DbResult<CompetitorPrice> {
        let observation = CompetitorPrice {
            id: Uuid::new_v4().to_string(),
            product_id: product_id.to_string(),
            competitor_name: competitor_name.to_string(),
            price,
            timestamp: Utc::now(),
            is_active: true,
        };

        self.insert_record(&observation).await?;
        Ok(observation)
    }

    /// Inserts a fully formed observation (seed data, backfills).
    pub async fn insert_record(&self, observation: &CompetitorPrice) -> DbResult<()> {
        debug!(
            product_id = %observation.product_id,
            competitor = %observation.competitor_name,
            price = observation.price,
            "Recording competitor price"
        );

        sqlx::query(
            r#"
            INSERT INTO competitor_prices (
                id, product_id, competitor_name, price, timestamp, is_active
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&observation.id)
        .bind(&observation.product_id)
        .bind(&observation.competitor_name)
        .bind(observation.price)
        .bind(observation.timestamp)
        .bind(observation.is_active)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Records one observation per `(competitor_name, price)` in a single
    /// transaction. Either every row lands or none does.
    pub async fn insert_batch(
        &self,
        product_id: &str,
        quotes: &[(String, f64)],
    ) -> DbResult<Vec<CompetitorPrice>> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;
        let mut stored = Vec::with_capacity(quotes.len());

        for (competitor_name, price) in quotes {
            let observation = CompetitorPrice {
                id: Uuid::new_v4().to_string(),
                product_id: product_id.to_string(),
                competitor_name: competitor_name.clone(),
                price: *price,
                timestamp: now,
                is_active: true,
            };

            sqlx::query(
                r#"
                INSERT INTO competitor_prices (
                    id, product_id, competitor_name, price, timestamp, is_active
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )
            .bind(&observation.id)
            .bind(&observation.product_id)
            .bind(&observation.competitor_name)
            .bind(observation.price)
            .bind(observation.timestamp)
            .bind(observation.is_active)
            .execute(&mut *tx)
            .await?;

            stored.push(observation);
        }

        tx.commit().await?;

        debug!(product_id, count = stored.len(), "Competitor price batch recorded");
        Ok(stored)
    }

    /// Average active competitor price observed at or after `since`.
    ///
    /// ## Returns
    /// `None` when no observation falls in the window.
    pub async fn average_since(&self, since: DateTime<Utc>) -> DbResult<Option<f64>> {
        let average: Option<f64> = sqlx::query_scalar(
            r#"
            SELECT AVG(price)
            FROM competitor_prices
            WHERE timestamp >= ?1 AND is_active = 1
            "#,
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(average)
    }

    /// Lists observations for a product, newest first.
    pub async fn list_for_product(&self, product_id: &str) -> DbResult<Vec<CompetitorPrice>> {
        let observations: Vec<CompetitorPrice> = sqlx::query_as(
            r#"
            SELECT id, product_id, competitor_name, price, timestamp, is_active
            FROM competitor_prices
            WHERE product_id = ?1
            ORDER BY timestamp DESC, rowid DESC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(observations)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Duration;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let db = test_db().await;
        let repo = db.competitors();

        repo.insert("PROD-001", "Amazon", 45.5).await.unwrap();
        let latest = repo.insert("PROD-001", "Walmart", 52.25).await.unwrap();
        repo.insert("PROD-002", "Target", 41.0).await.unwrap();

        let listed = repo.list_for_product("PROD-001").await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0], latest);
        assert!(listed.iter().all(|p| p.is_active));
    }

    #[tokio::test]
    async fn test_insert_batch() {
        let db = test_db().await;
        let repo = db.competitors();
        let quotes = vec![("Amazon".to_string(), 41.5), ("eBay".to_string(), 58.0)];

        let stored = repo.insert_batch("PROD-001", &quotes).await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].timestamp, stored[1].timestamp);

        let listed = repo.list_for_product("PROD-001").await.unwrap();
        assert_eq!(listed.len(), 2);
    }

    #[tokio::test]
    async fn test_average_empty_window() {
        let db = test_db().await;
        let since = Utc::now() - Duration::days(7);
        assert_eq!(db.competitors().average_since(since).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_average_spans_products_and_skips_old_and_inactive() {
        let db = test_db().await;
        let repo = db.competitors();
        let now = Utc::now();

        repo.insert("PROD-001", "Amazon", 40.0).await.unwrap();
        repo.insert("PROD-002", "eBay", 60.0).await.unwrap();

        repo.insert_record(&CompetitorPrice {
            id: "old".to_string(),
            product_id: "PROD-001".to_string(),
            competitor_name: "BestBuy".to_string(),
            price: 1000.0,
            timestamp: now - Duration::days(30),
            is_active: true,
        })
        .await
        .unwrap();

        repo.insert_record(&CompetitorPrice {
            id: "inactive".to_string(),
            product_id: "PROD-001".to_string(),
            competitor_name: "Target".to_string(),
            price: 1000.0,
            timestamp: now,
            is_active: false,
        })
        .await
        .unwrap();

        let average = repo
            .average_since(now - Duration::days(7))
            .await
            .unwrap()
            .unwrap();
        assert!((average - 50.0).abs() < 1e-9);
    }
}
