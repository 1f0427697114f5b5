//! Seed endpoint

use crate::{ApiError, AppState};
use axum::extract::State;
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub message: String,
    pub inserted: usize,
}

/// Fetch upstream records and replace the store contents
pub async fn api_seed(State(state): State<AppState>) -> Result<Json<SeedResponse>, ApiError> {
    let report = state
        .seeder
        .run()
        .await
        .map_err(|e| state.fail("seed", "Failed to seed database.", e, None))?;

    Ok(Json(SeedResponse {
        message: "Database initialized with seed data.".to_string(),
        inserted: report.inserted,
    }))
}
