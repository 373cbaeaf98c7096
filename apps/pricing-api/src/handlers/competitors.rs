//! Competitor price refresh endpoint.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::monitor;
use crate::state::AppState;

/// Acknowledgement returned before the refresh runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `POST /competitor-prices/update`
pub async fn update_competitor_prices(State(state): State<AppState>) -> Json<MessageResponse> {
    monitor::spawn_refresh(state.db.competitors());

    Json(MessageResponse {
        message: "Competitor price monitoring initiated".to_string(),
    })
}
