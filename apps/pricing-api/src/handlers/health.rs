//! Health check endpoint for load balancers and monitoring.

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health report. `status` stays "healthy" while the process serves;
/// `database` carries the store's reachability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub database: String,
    /// Absent when the store cannot be read.
    pub migrations: Option<MigrationReport>,
}

/// Schema migration counts as seen by this binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationReport {
    pub embedded: usize,
    pub applied: usize,
    pub current: bool,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = if state.db.health_check().await {
        "connected"
    } else {
        tracing::warn!("Health check: database unreachable");
        "disconnected"
    };

    let migrations = match state.db.migration_status().await {
        Ok(status) => Some(MigrationReport {
            embedded: status.embedded,
            applied: status.applied,
            current: status.is_current(),
        }),
        Err(e) => {
            tracing::warn!(error = %e, "Health check: migration status unavailable");
            None
        }
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        database: database.to_string(),
        migrations,
    })
}
