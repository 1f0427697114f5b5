//! Transaction listing endpoint

use crate::params::{ListParams, RawParams};
use crate::{ApiError, AppState};
use axum::extract::{Query, State};
use axum::Json;
use salesboard_core::{list_transactions, TransactionsPage};

/// Transactions of a month, optionally searched, one page at a time
pub async fn api_transactions(
    State(state): State<AppState>,
    Query(raw): Query<RawParams>,
) -> Result<Json<TransactionsPage>, ApiError> {
    let params = ListParams::from_raw(&raw, &state.config);
    list_transactions(state.store.as_ref(), &params.filter, params.pagination)
        .await
        .map(Json)
        .map_err(|e| state.fail("transactions", "Failed to fetch transactions.", e, raw.month.as_deref()))
}
