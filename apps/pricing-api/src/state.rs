//! Shared application state.

use dynprice_core::PricingEngine;
use dynprice_db::Database;

/// State handed to every handler. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Pool-backed database handle.
    pub db: Database,

    /// Stateless engine, built once at startup.
    pub engine: PricingEngine,
}

impl AppState {
    /// Creates state around an opened database.
    pub fn new(db: Database) -> Self {
        AppState {
            db,
            engine: PricingEngine::new(),
        }
    }
}
