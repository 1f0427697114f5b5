//! Monthly statistics and chart endpoints

use crate::params::RawParams;
use crate::{ApiError, AppState};
use axum::extract::{Query, State};
use axum::Json;
use salesboard_core::{CategoryCount, PriceRangeCount, SalesStatistics};

/// Sold amount and sold/unsold counts
pub async fn api_statistics(
    State(state): State<AppState>,
    Query(raw): Query<RawParams>,
) -> Result<Json<SalesStatistics>, ApiError> {
    let month = raw.month_or_default(&state.config);
    state
        .aggregator
        .statistics(month)
        .await
        .map(Json)
        .map_err(|e| state.fail("statistics", "Failed to fetch statistics.", e, raw.month.as_deref()))
}

/// Ten price buckets with their item counts
pub async fn api_barchart(
    State(state): State<AppState>,
    Query(raw): Query<RawParams>,
) -> Result<Json<Vec<PriceRangeCount>>, ApiError> {
    let month = raw.month_or_default(&state.config);
    state
        .aggregator
        .price_histogram(month)
        .await
        .map(Json)
        .map_err(|e| state.fail("barchart", "Failed to fetch bar chart data.", e, raw.month.as_deref()))
}

/// Item count per category; the month is mandatory here
pub async fn api_piechart(
    State(state): State<AppState>,
    Query(raw): Query<RawParams>,
) -> Result<Json<Vec<CategoryCount>>, ApiError> {
    let month = raw.required_month()?;
    state
        .aggregator
        .category_breakdown(month)
        .await
        .map(Json)
        .map_err(|e| state.fail("piechart", "Failed to fetch pie chart data.", e, raw.month.as_deref()))
}
