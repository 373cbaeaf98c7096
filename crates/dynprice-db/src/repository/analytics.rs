//! # Analytics Repository
//!
//! Read-only aggregates over pricing history and competitor prices.
//!
//! ## Query Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   pricing_performance(window)                           │
//! │                                                                         │
//! │  since = now - window.days                                             │
//! │       │                                                                 │
//! │       ├──► pricing_history   AVG / COUNT / AVG / SUM   ──► metrics     │
//! │       │      (timestamp >= since, optional product_id)                 │
//! │       │                                                                 │
//! │       ├──► competitor_prices AVG(price)                ──► metrics     │
//! │       │      (timestamp >= since, all products)                        │
//! │       │                                                                 │
//! │       └──► pricing_history   GROUP BY UTC date         ──► trend       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Timestamps are RFC 3339 text in UTC, so `>=` on the column compares in
//! time order and the first ten characters are the calendar date.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::repository::competitor::CompetitorPriceRepository;
use dynprice_core::{AnalyticsWindow, PerformanceMetrics, PriceTrendPoint, PricingPerformance};

/// Raw window aggregate: AVG(price), COUNT, AVG(conversion), SUM(revenue).
type WindowAggregate = (Option<f64>, i64, Option<f64>, Option<f64>);

/// Repository for analytics queries.
#[derive(Debug, Clone)]
pub struct AnalyticsRepository {
    pool: SqlitePool,
}

impl AnalyticsRepository {
    /// Creates a new AnalyticsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AnalyticsRepository { pool }
    }

    /// Metrics and daily trend for the window ending now.
    pub async fn pricing_performance(
        &self,
        window: &AnalyticsWindow,
    ) -> DbResult<PricingPerformance> {
        self.pricing_performance_at(window, Utc::now()).await
    }

    /// Same as [`Self::pricing_performance`] with an explicit "now".
    pub async fn pricing_performance_at(
        &self,
        window: &AnalyticsWindow,
        now: DateTime<Utc>,
    ) -> DbResult<PricingPerformance> {
        let since = window.since(now);
        let product_id = window.product_id.as_deref();

        debug!(
            product_id = ?product_id,
            days = window.days,
            since = %since,
            "Computing pricing performance"
        );

        let metrics = self.metrics(product_id, since).await?;
        let price_trend = self.price_trend(product_id, since).await?;

        Ok(PricingPerformance {
            metrics,
            price_trend,
        })
    }

    /// Window aggregate. Every field is zero when nothing matches.
    pub async fn metrics(
        &self,
        product_id: Option<&str>,
        since: DateTime<Utc>,
    ) -> DbResult<PerformanceMetrics> {
        let (average_price, price_changes, conversion_rate, revenue_impact): WindowAggregate =
            sqlx::query_as(
                r#"
                SELECT
                    AVG(dynamic_price),
                    COUNT(*),
                    AVG(conversion_rate),
                    SUM(revenue_generated)
                FROM pricing_history
                WHERE timestamp >= ?1
                  AND (?2 IS NULL OR product_id = ?2)
                "#,
            )
            .bind(since)
            .bind(product_id)
            .fetch_one(&self.pool)
            .await?;

        let competitor_price_avg = CompetitorPriceRepository::new(self.pool.clone())
            .average_since(since)
            .await?;

        Ok(PerformanceMetrics {
            average_price: average_price.unwrap_or(0.0),
            price_changes,
            conversion_rate: conversion_rate.unwrap_or(0.0),
            revenue_impact: revenue_impact.unwrap_or(0.0),
            competitor_price_avg: competitor_price_avg.unwrap_or(0.0),
        })
    }

    /// Average dynamic price and calculation count per UTC date, oldest first.
    pub async fn price_trend(
        &self,
        product_id: Option<&str>,
        since: DateTime<Utc>,
    ) -> DbResult<Vec<PriceTrendPoint>> {
        let points: Vec<PriceTrendPoint> = sqlx::query_as(
            r#"
            SELECT
                substr(timestamp, 1, 10) AS date,
                AVG(dynamic_price) AS price,
                COUNT(*) AS sales
            FROM pricing_history
            WHERE timestamp >= ?1
              AND (?2 IS NULL OR product_id = ?2)
            GROUP BY substr(timestamp, 1, 10)
            ORDER BY date ASC
            "#,
        )
        .bind(since)
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(points)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::history::generate_history_id;
    use chrono::{Duration, TimeZone};
    use dynprice_core::PricingHistoryRecord;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn record_at(
        product_id: &str,
        timestamp: DateTime<Utc>,
        dynamic_price: f64,
        conversion_rate: f64,
        revenue_generated: f64,
    ) -> PricingHistoryRecord {
        PricingHistoryRecord {
            id: generate_history_id(),
            product_id: product_id.to_string(),
            timestamp,
            original_price: 13.0,
            dynamic_price,
            demand_score: 5,
            inventory: 50,
            competitor_price: 20.0,
            strategy_used: "default".to_string(),
            conversion_rate,
            revenue_generated,
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_empty_window_is_all_zero() {
        let db = test_db().await;
        let performance = db
            .analytics()
            .pricing_performance(&AnalyticsWindow::default())
            .await
            .unwrap();

        assert_eq!(performance, PricingPerformance::default());
    }

    #[tokio::test]
    async fn test_metrics_and_trend() {
        let db = test_db().await;
        let history = db.history();
        let now = fixed_now();

        history
            .insert(&record_at("SKU-1", now - Duration::hours(1), 10.0, 0.5, 100.0))
            .await
            .unwrap();
        history
            .insert(&record_at("SKU-1", now - Duration::hours(2), 20.0, 0.1, 50.0))
            .await
            .unwrap();
        history
            .insert(&record_at("SKU-2", now - Duration::days(2), 30.0, 0.0, 0.0))
            .await
            .unwrap();
        // Outside the default seven days.
        history
            .insert(&record_at("SKU-1", now - Duration::days(30), 999.0, 1.0, 999.0))
            .await
            .unwrap();

        let performance = db
            .analytics()
            .pricing_performance_at(&AnalyticsWindow::default(), now)
            .await
            .unwrap();

        let metrics = &performance.metrics;
        assert_eq!(metrics.price_changes, 3);
        assert!((metrics.average_price - 20.0).abs() < 1e-9);
        assert!((metrics.conversion_rate - 0.2).abs() < 1e-9);
        assert!((metrics.revenue_impact - 150.0).abs() < 1e-9);
        assert_eq!(metrics.competitor_price_avg, 0.0);

        assert_eq!(
            performance.price_trend,
            vec![
                PriceTrendPoint {
                    date: "2026-03-08".to_string(),
                    price: 30.0,
                    sales: 1,
                },
                PriceTrendPoint {
                    date: "2026-03-10".to_string(),
                    price: 15.0,
                    sales: 2,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_product_filter() {
        let db = test_db().await;
        let history = db.history();
        let now = fixed_now();

        history
            .insert(&record_at("SKU-1", now - Duration::hours(1), 10.0, 0.0, 0.0))
            .await
            .unwrap();
        history
            .insert(&record_at("SKU-2", now - Duration::hours(1), 30.0, 0.0, 0.0))
            .await
            .unwrap();

        let window = AnalyticsWindow {
            product_id: Some("SKU-2".to_string()),
            days: 7,
        };
        let performance = db
            .analytics()
            .pricing_performance_at(&window, now)
            .await
            .unwrap();

        assert_eq!(performance.metrics.price_changes, 1);
        assert_eq!(performance.metrics.average_price, 30.0);
        assert_eq!(performance.price_trend.len(), 1);
        assert_eq!(performance.price_trend[0].sales, 1);
    }

    #[tokio::test]
    async fn test_competitor_average_ignores_product_filter() {
        let db = test_db().await;
        let competitors = db.competitors();
        competitors.insert("PROD-001", "Amazon", 40.0).await.unwrap();
        competitors.insert("PROD-002", "Target", 50.0).await.unwrap();

        let window = AnalyticsWindow {
            product_id: Some("SKU-1".to_string()),
            days: 7,
        };
        let performance = db.analytics().pricing_performance(&window).await.unwrap();

        assert_eq!(performance.metrics.price_changes, 0);
        assert!((performance.metrics.competitor_price_avg - 45.0).abs() < 1e-9);
    }
}
