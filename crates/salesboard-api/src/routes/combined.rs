//! Combined dashboard endpoint

use crate::params::{ListParams, RawParams};
use crate::{ApiError, AppState};
use axum::extract::{Query, State};
use axum::Json;
use salesboard_core::{list_transactions, CombinedReport};

/// Listing, statistics and both charts for one month in a single response.
///
/// The pie chart follows the same month default as the other parts.
pub async fn api_combined(
    State(state): State<AppState>,
    Query(raw): Query<RawParams>,
) -> Result<Json<CombinedReport>, ApiError> {
    let params = ListParams::from_raw(&raw, &state.config);
    let month = params.filter.month;

    let (transactions, statistics, bar_chart_data, pie_chart_data) = tokio::try_join!(
        list_transactions(state.store.as_ref(), &params.filter, params.pagination),
        state.aggregator.statistics(month),
        state.aggregator.price_histogram(month),
        state.aggregator.category_breakdown(month),
    )
    .map_err(|e| state.fail("combined", "Error fetching combined data", e, raw.month.as_deref()))?;

    Ok(Json(CombinedReport {
        transactions,
        statistics,
        bar_chart_data,
        pie_chart_data,
    }))
}
