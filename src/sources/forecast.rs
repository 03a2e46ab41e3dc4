use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Prediction service response.
#[derive(Debug, Deserialize)]
struct PredictionResponse {
    predicted_change_pct: Option<f64>,
}

/// Client for the external price-prediction service.
///
/// Failures never propagate: the analysis falls back to its own
/// statistical forecast.
#[derive(Clone)]
pub struct ForecastClient {
    client: Client,
    base_url: String,
}

impl ForecastClient {
    pub const MODEL: &'static str = "prophet";
    pub const HORIZON_DAYS: u32 = 7;

    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .user_agent("CryptoVision/1.0")
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn predict_url(&self, symbol: &str) -> String {
        format!(
            "{}/api/predict/{}",
            self.base_url.trim_end_matches('/'),
            symbol.to_uppercase()
        )
    }

    async fn fetch(&self, symbol: &str) -> anyhow::Result<Option<f64>> {
        let response = self
            .client
            .get(self.predict_url(symbol))
            .query(&[
                ("model", Self::MODEL.to_string()),
                ("days", Self::HORIZON_DAYS.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "Prediction service error: {}",
                response.status()
            ));
        }

        let body: PredictionResponse = response.json().await?;
        Ok(body.predicted_change_pct)
    }

    /// Predicted percentage change over the horizon, if available.
    pub async fn predicted_change_pct(&self, symbol: &str) -> Option<f64> {
        match self.fetch(symbol).await {
            Ok(pct) => {
                debug!("Forecast for {}: {:?}", symbol, pct);
                pct
            }
            Err(e) => {
                warn!("Forecast unavailable for {}: {}", symbol, e);
                None
            }
        }
    }
}
