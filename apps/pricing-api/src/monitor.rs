//! # Competitor Price Monitor
//!
//! Mock competitor sampling, run in the background after
//! `POST /competitor-prices/update` has already answered.
//!
//! ```text
//! handler ──► sample_prices(thread_rng)      (sync, before spawning)
//!    │
//!    ├──► tokio::spawn ──► insert_batch(PROD-001, 5 quotes)   (one transaction)
//!    │
//!    └──► 200 {"message": "Competitor price monitoring initiated"}
//! ```
//!
//! Failures in the task are logged, never reported to the caller.

use rand::Rng;
use tokio::task::JoinHandle;
use tracing::{error, info};

use dynprice_core::money::round_to_cents;
use dynprice_db::{CompetitorPriceRepository, DbResult};

/// Competitors the monitor samples.
pub const MONITORED_COMPETITORS: [&str; 5] = ["Amazon", "Walmart", "Target", "BestBuy", "eBay"];

/// Product the monitor samples competitors for.
pub const MONITORED_PRODUCT_ID: &str = "PROD-001";

/// Lowest mock price.
pub const MOCK_PRICE_MIN: f64 = 40.0;

/// Highest mock price.
pub const MOCK_PRICE_MAX: f64 = 60.0;

/// One uniform price per monitored competitor, rounded to cents.
pub fn sample_prices<R: Rng + ?Sized>(rng: &mut R) -> Vec<(String, f64)> {
    MONITORED_COMPETITORS
        .iter()
        .map(|name| {
            let raw: f64 = rng.gen_range(MOCK_PRICE_MIN..=MOCK_PRICE_MAX);
            (name.to_string(), round_to_cents(raw))
        })
        .collect()
}

/// Stores a sampled batch for the monitored product.
pub async fn record_prices(
    repo: &CompetitorPriceRepository,
    quotes: &[(String, f64)],
) -> DbResult<usize> {
    let stored = repo.insert_batch(MONITORED_PRODUCT_ID, quotes).await?;
    Ok(stored.len())
}

/// Samples now and records on a background task.
pub fn spawn_refresh(repo: CompetitorPriceRepository) -> JoinHandle<()> {
    let quotes = sample_prices(&mut rand::thread_rng());

    tokio::spawn(async move {
        match record_prices(&repo, &quotes).await {
            Ok(count) => info!(
                product_id = MONITORED_PRODUCT_ID,
                count,
                "Competitor prices refreshed"
            ),
            Err(e) => error!(
                product_id = MONITORED_PRODUCT_ID,
                error = %e,
                "Competitor price refresh failed"
            ),
        }
    })
}
