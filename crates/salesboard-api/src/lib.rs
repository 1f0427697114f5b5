//! HTTP API server
//!
//! Every sales route is served both at the root and under `/api`:
//! - /seed: replace the record store with upstream data
//! - /transactions: month + search filtered listing with pagination
//! - /statistics, /barchart, /piechart: monthly aggregates
//! - /combined: the four above in one response

pub mod error;
pub mod params;
pub mod routes;

use axum::{routing::get, Router};
use salesboard_config::{Config, ConfigError, ConfigResult};
use salesboard_core::{
    month_name_to_index, Aggregator, CoreError, DefaultErrorLogger, ErrorContext, ErrorLogger,
    SeedLoader, SeedSourceRef, StoreRef,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: StoreRef,
    pub aggregator: Aggregator,
    pub seeder: SeedLoader,
    pub errors: Arc<dyn ErrorLogger>,
}

impl AppState {
    /// Fails when the configured default month is not a month name
    pub fn new(config: Config, store: StoreRef, source: SeedSourceRef) -> ConfigResult<Self> {
        if month_name_to_index(&config.query.default_month).is_none() {
            return Err(ConfigError::InvalidValue {
                field: "query.default_month".to_string(),
                reason: format!("'{}' is not a month name", config.query.default_month),
            });
        }

        Ok(Self {
            config: Arc::new(config),
            aggregator: Aggregator::new(store.clone()),
            seeder: SeedLoader::new(source, store.clone()),
            store,
            errors: Arc::new(DefaultErrorLogger),
        })
    }

    /// Log a core failure and turn it into a generic 500
    pub(crate) fn fail(
        &self,
        operation: &str,
        message: &str,
        error: CoreError,
        month: Option<&str>,
    ) -> ApiError {
        let mut context = ErrorContext::new(operation);
        if let Some(month) = month {
            context = context.with_data("month", serde_json::json!(month));
        }
        self.errors.log_error(&error, &context);
        ApiError::internal(message, &error)
    }
}

fn sales_routes() -> Router<AppState> {
    use routes::{api_barchart, api_combined, api_piechart, api_seed, api_statistics, api_transactions};

    Router::new()
        .route("/seed", get(api_seed))
        .route("/transactions", get(api_transactions))
        .route("/statistics", get(api_statistics))
        .route("/barchart", get(api_barchart))
        .route("/piechart", get(api_piechart))
        .route("/combined", get(api_combined))
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors = state.config.server.cors_permissive;

    let router = Router::new()
        .route("/api/health", get(health_check))
        .merge(sales_routes())
        .nest("/api", sales_routes())
        .with_state(state);

    if cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Bind the configured address and serve until Ctrl-C
pub async fn start_server(state: AppState) -> anyhow::Result<()> {
    let addr = state.config.bind_addr();
    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting salesboard server on http://{}", addr);
    log::info!("Available routes (also under /api):");
    log::info!("  - /seed");
    log::info!("  - /transactions?month=&search=&page=&perPage=");
    log::info!("  - /statistics?month=");
    log::info!("  - /barchart?month=");
    log::info!("  - /piechart?month=");
    log::info!("  - /combined?month=");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("Server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

// ==================== Tests ====================
