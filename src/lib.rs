//! CryptoVision - technical-analysis signal engine and API for daily crypto candles

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

use axum::Router;
use config::Config;
use services::AnalysisService;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub analysis_service: Arc<AnalysisService>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let analysis_service = Arc::new(AnalysisService::new(&config));
        Self {
            config: Arc::new(config),
            analysis_service,
        }
    }
}

/// Build the HTTP application with its middleware.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
