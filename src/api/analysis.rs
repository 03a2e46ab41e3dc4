//! Analysis endpoints.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::api::ApiResponse;
use crate::error::Result;
use crate::services::AnalysisService;
use crate::types::{AnalysisResult, Candle, SymbolAnalysis};
use crate::AppState;

/// Body of `POST /api/analysis`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    /// Candles, oldest first.
    pub candles: Vec<Candle>,
    /// Externally predicted change over the forecast horizon, in percent.
    pub forecast_pct: Option<f64>,
}

/// Analyze a supported asset from live exchange data.
async fn get_analysis(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<ApiResponse<SymbolAnalysis>>> {
    let asset = AnalysisService::asset(&symbol)?;
    let (analysis, cached) = state.analysis_service.analyze_symbol(asset).await?;
    Ok(Json(ApiResponse::with_cached(analysis, cached)))
}

/// Analyze caller-supplied candles.
async fn post_analysis(
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<ApiResponse<AnalysisResult>>> {
    let analysis = AnalysisService::analyze_candles(&request.candles, request.forecast_pct)?;
    Ok(Json(ApiResponse::new(analysis)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/analysis", post(post_analysis))
        .route("/api/analysis/:symbol", get(get_analysis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_request_deserialization() {
        let json = r#"{
            "candles": [{"time": 0, "open": 1, "high": 2, "low": 0.5, "close": 1.5, "volume": 10}],
            "forecastPct": 2.5
        }"#;
        let request: AnalyzeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.candles.len(), 1);
        assert_eq!(request.forecast_pct, Some(2.5));

        let request: AnalyzeRequest = serde_json::from_str(r#"{"candles": []}"#).unwrap();
        assert_eq!(request.forecast_pct, None);
    }

    #[tokio::test]
    async fn test_post_analysis_single_candle_rejected() {
        let request = AnalyzeRequest {
            candles: vec![Candle::new(0, 1.0, 1.0, 1.0, 1.0, 1.0)],
            forecast_pct: None,
        };
        let result = post_analysis(Json(request)).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
