//! # Seed Data Generator
//!
//! Populates the database with pricing history and competitor prices for
//! development, so the analytics endpoint has something to aggregate.
//!
//! ## Usage
//! ```bash
//! # 500 history rows spread over 14 days (default)
//! cargo run -p dynprice-db --bin seed
//!
//! # Custom amount and window
//! cargo run -p dynprice-db --bin seed -- --count 2000 --days 30
//!
//! # Specify database path
//! cargo run -p dynprice-db --bin seed -- --db ./data/pricing.db
//! ```
//!
//! ## Generated Rows
//! - History for `PROD-001`..`PROD-005`, priced by the real engine with every
//!   strategy and segment, backdated across the window
//! - Conversion and revenue filled in as if sales tracking had run
//! - One competitor observation per monitored competitor per day

use chrono::{Duration, Utc};
use dynprice_core::money::round_to_cents;
use dynprice_core::{CompetitorPrice, PricingEngine, PricingHistoryRecord, PricingRequest, Strategy};
use dynprice_db::{Database, DbConfig};
use std::env;
use uuid::Uuid;

/// Products that receive history rows.
const PRODUCTS: &[&str] = &["PROD-001", "PROD-002", "PROD-003", "PROD-004", "PROD-005"];

/// Competitors that receive one observation per day.
const COMPETITORS: &[&str] = &["Amazon", "Walmart", "Target", "BestBuy", "eBay"];

/// Product the competitor observations belong to.
const COMPETITOR_PRODUCT_ID: &str = "PROD-001";

/// Segment tags cycled through the requests.
const SEGMENTS: &[&str] = &["standard", "premium", "budget", "loyalty"];

/// Seasonality multipliers cycled through the requests.
const SEASONALITY: &[f64] = &[1.0, 1.0, 1.1, 0.9];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 500;
    let mut days: i64 = 14;
    let mut db_path = String::from("./pricing.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(500);
                    i += 1;
                }
            }
            "--days" | "-n" => {
                if i + 1 < args.len() {
                    days = args[i + 1].parse().unwrap_or(14).max(1);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Dynprice Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    History rows to generate (default: 500)");
                println!("  -n, --days <N>     Days to spread rows over (default: 14)");
                println!("  -d, --db <PATH>    Database file path (default: ./pricing.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Dynprice Seed Data Generator");
    println!("===============================");
    println!("Database: {}", db_path);
    println!("History rows: {}", count);
    println!("Days: {}", days);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.history().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} history rows", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating pricing history...");

    let engine = PricingEngine::new();
    let history = db.history();
    let start = std::time::Instant::now();
    let mut generated = 0;

    for seed in 0..count {
        let request = sample_request(seed);
        let strategy = Strategy::ALL[seed % Strategy::ALL.len()];

        let quote = match engine.quote(&request, strategy.as_str()) {
            Ok(quote) => quote,
            Err(e) => {
                eprintln!("Failed to price {}: {}", request.product_id, e);
                continue;
            }
        };

        let age = Duration::days((seed as i64) % days) + Duration::minutes((seed % 1440) as i64);
        let conversion_rate = 0.02 + ((seed * 7) % 13) as f64 / 100.0;

        let record = PricingHistoryRecord {
            id: Uuid::new_v4().to_string(),
            product_id: request.product_id.clone(),
            timestamp: Utc::now() - age,
            original_price: quote.base_price,
            dynamic_price: quote.dynamic_price,
            demand_score: request.demand_score,
            inventory: request.inventory,
            competitor_price: request.competitor_price,
            strategy_used: strategy.as_str().to_string(),
            conversion_rate,
            revenue_generated: quote.dynamic_price * conversion_rate * 100.0,
        };

        if let Err(e) = history.insert(&record).await {
            eprintln!("Failed to insert history for {}: {}", record.product_id, e);
            continue;
        }

        generated += 1;

        if generated % 100 == 0 {
            println!("  Generated {} rows...", generated);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} history rows in {:?}", generated, elapsed);

    println!();
    println!("Generating competitor prices...");

    let competitors = db.competitors();
    let mut observations = 0;
    for day in 0..days {
        for (idx, name) in COMPETITORS.iter().enumerate() {
            let seed = day as usize * COMPETITORS.len() + idx;
            let observation = CompetitorPrice {
                id: Uuid::new_v4().to_string(),
                product_id: COMPETITOR_PRODUCT_ID.to_string(),
                competitor_name: name.to_string(),
                price: 40.0 + ((seed * 1733) % 2001) as f64 / 100.0,
                timestamp: Utc::now() - Duration::days(day),
                is_active: true,
            };

            if let Err(e) = competitors.insert_record(&observation).await {
                eprintln!("Failed to insert {} price: {}", name, e);
                continue;
            }
            observations += 1;
        }
    }

    println!("✓ Generated {} competitor prices", observations);
    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}

/// Builds a deterministic but varied request.
fn sample_request(seed: usize) -> PricingRequest {
    let product_id = PRODUCTS[seed % PRODUCTS.len()];

    // Cost $5.00 - $34.50 in 50 cent steps
    let cost_price = 5.0 + ((seed * 17) % 60) as f64 * 0.5;

    // Competitor sits 20% under to 80% over cost
    let competitor_price = cost_price * (0.8 + ((seed * 11) % 100) as f64 / 100.0);

    PricingRequest::new(
        product_id,
        cost_price,
        (seed % 10) as i32 + 1,
        ((seed * 37) % 200) as i64,
        round_to_cents(competitor_price),
    )
    .with_segment(SEGMENTS[seed % SEGMENTS.len()])
    .with_seasonality(SEASONALITY[(seed / 4) % SEASONALITY.len()])
}
