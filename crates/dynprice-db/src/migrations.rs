//! # Schema Migrations
//!
//! The pricing schema ships inside the binary; `Database::new` brings any
//! store up to date before the first repository is handed out.
//!
//! ```text
//! migrations/sqlite/
//!   001_pricing_history.sql   pricing_history + product/time index
//!   002_competitor_prices.sql competitor_prices + product/time index
//!        │
//!        ▼  sqlx::migrate! (compile time)
//!   MIGRATOR ──run──► _sqlx_migrations bookkeeping table
//!        │
//!        └──status──► MigrationStatus { embedded, applied }  (GET /health)
//! ```
//!
//! Files are append-only: a new table or index is a new `NNN_*.sql` file.

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Embedded versus applied migration counts for one store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationStatus {
    /// Migrations compiled into this binary.
    pub embedded: usize,
    /// Rows in `_sqlx_migrations`.
    pub applied: usize,
}

impl MigrationStatus {
    /// True when every embedded migration has run.
    pub fn is_current(&self) -> bool {
        self.applied >= self.embedded
    }
}

/// Applies pending migrations. Already-applied files are skipped.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    MIGRATOR.run(pool).await?;
    info!(embedded = MIGRATOR.migrations.len(), "Pricing schema up to date");
    Ok(())
}

/// Reads the bookkeeping table and compares it with the embedded set.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<MigrationStatus> {
    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await?;

    let status = MigrationStatus {
        embedded: MIGRATOR.migrations.len(),
        applied: applied.max(0) as usize,
    };
    if !status.is_current() {
        warn!(
            embedded = status.embedded,
            applied = status.applied,
            "Pricing schema is behind"
        );
    }
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn bare_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_fresh_store_is_current_after_run() {
        let pool = bare_pool().await;

        run_migrations(&pool).await.unwrap();
        let status = migration_status(&pool).await.unwrap();

        assert_eq!(status, MigrationStatus { embedded: 2, applied: 2 });
        assert!(status.is_current());
    }

    #[tokio::test]
    async fn test_status_without_bookkeeping_table_fails() {
        let pool = bare_pool().await;
        assert!(migration_status(&pool).await.is_err());
    }

    #[test]
    fn test_partial_schema_is_not_current() {
        let status = MigrationStatus { embedded: 2, applied: 1 };
        assert!(!status.is_current());
    }
}
