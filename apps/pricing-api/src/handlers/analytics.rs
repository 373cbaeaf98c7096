//! Pricing analytics endpoint.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;

use dynprice_core::{AnalyticsWindow, PricingPerformance};

use crate::error::ApiResult;
use crate::state::AppState;

/// `GET /analytics/pricing-performance?product_id=&days=`
///
/// `days` defaults to 7. An empty `product_id` covers all products.
pub async fn pricing_performance(
    State(state): State<AppState>,
    query: Result<Query<AnalyticsWindow>, QueryRejection>,
) -> ApiResult<Json<PricingPerformance>> {
    let Query(mut window) = query?;
    window.product_id = window.product_id.filter(|id| !id.is_empty());

    let performance = state.db.analytics().pricing_performance(&window).await?;
    Ok(Json(performance))
}
