//! Asset catalogue and market-data endpoints.

use crate::api::ApiResponse;
use crate::error::{AppError, Result};
use crate::services::AnalysisService;
use crate::types::{Asset, KlineInterval, PriceHistory, Ticker24h, SUPPORTED_ASSETS};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

/// Query parameters for the price history.
#[derive(Debug, Default, Deserialize)]
pub struct PricesQuery {
    /// `1h`, `4h` or `1d` (default).
    pub interval: Option<String>,
    /// Number of candles to fetch; defaults to the configured kline limit.
    pub lookback: Option<u32>,
}

impl PricesQuery {
    fn interval(&self) -> Result<KlineInterval> {
        match self.interval.as_deref() {
            None => Ok(KlineInterval::default()),
            Some(code) => KlineInterval::from_str(code).ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Unsupported interval: {} (expected 1h, 4h or 1d)",
                    code
                ))
            }),
        }
    }
}

/// GET /api/assets
async fn get_assets() -> Json<ApiResponse<&'static [Asset]>> {
    Json(ApiResponse::new(SUPPORTED_ASSETS))
}

/// GET /api/prices/:symbol?interval=1d&lookback=90
async fn get_prices(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<PricesQuery>,
) -> Result<Json<ApiResponse<PriceHistory>>> {
    let asset = AnalysisService::asset(&symbol)?;
    let interval = query.interval()?;
    let lookback = query.lookback.unwrap_or(state.config.kline_limit);

    let (history, cached) = state
        .analysis_service
        .price_history(asset, interval, lookback)
        .await?;
    Ok(Json(ApiResponse::with_cached(history, cached)))
}

/// GET /api/price/:symbol/latest
async fn get_latest_price(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<ApiResponse<Ticker24h>>> {
    let asset = AnalysisService::asset(&symbol)?;
    let ticker = state.analysis_service.ticker(asset).await?;
    Ok(Json(ApiResponse::new(ticker)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/assets", get(get_assets))
        .route("/api/prices/:symbol", get(get_prices))
        .route("/api/price/:symbol/latest", get(get_latest_price))
}
