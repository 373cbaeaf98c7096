//! Price calculation endpoint.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use dynprice_core::{PriceQuote, PricingRequest, DEFAULT_STRATEGY};

use crate::error::ApiResult;
use crate::state::AppState;

/// `?strategy=` query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyQuery {
    #[serde(default = "default_strategy")]
    pub strategy: String,
}

fn default_strategy() -> String {
    DEFAULT_STRATEGY.to_string()
}

/// `POST /calculate-price`
///
/// Prices the request and appends its history record before answering.
/// Unknown strategy names run `default`; the quote's `strategy` field says
/// which one ran.
pub async fn calculate_price(
    State(state): State<AppState>,
    query: Result<Query<StrategyQuery>, QueryRejection>,
    payload: Result<Json<PricingRequest>, JsonRejection>,
) -> ApiResult<Json<PriceQuote>> {
    let Query(query) = query?;
    let Json(request) = payload?;

    let history = state.db.history();
    let quote = state
        .engine
        .calculate(&history, &request, &query.strategy)
        .await?;

    Ok(Json(quote))
}
