//! Technical-analysis signal engine.
//!
//! Computes an indicator snapshot for the latest and the previous candle,
//! runs the rule bank over the pair, aggregates the votes into a signal,
//! projects a short-horizon forecast and derives a sentiment index.
//! Everything here is synchronous and free of shared state.

pub mod forecast;
pub mod indicators;
pub mod overlay;
pub mod rules;
pub mod scorer;
pub mod sentiment;
pub mod snapshot;

pub use overlay::overlay;
pub use rules::{rule_bank, TradingRule};
pub use snapshot::{snapshot, SnapshotPair};

use thiserror::Error;

use crate::types::{AnalysisResult, Candle};

/// Minimum number of candles `analyze` accepts.
pub const MIN_CANDLES: usize = 2;

#[derive(Debug, Error, PartialEq)]
pub enum SignalError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Run the full analysis over `candles`, oldest first.
///
/// Candle times must be strictly increasing.
///
/// `forecast_override` is an externally predicted percentage change for
/// the forecast horizon; a missing, zero or non-finite value falls back to
/// the statistical projection.
pub fn analyze(
    candles: &[Candle],
    forecast_override: Option<f64>,
) -> Result<AnalysisResult, SignalError> {
    if let Some(pair) = candles.windows(2).find(|w| w[1].time <= w[0].time) {
        return Err(SignalError::InvalidInput(format!(
            "candle times must be strictly increasing, got {} after {}",
            pair[1].time, pair[0].time
        )));
    }

    let pair = SnapshotPair::from_candles(candles).ok_or_else(|| {
        SignalError::InvalidInput(format!(
            "at least {} candles required, got {}",
            MIN_CANDLES,
            candles.len()
        ))
    })?;

    let rules = rules::evaluate_all(&pair);
    let (total_score, signal) = scorer::score(&rules);

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let forecast = forecast::forecast(&closes, forecast_override);

    let current = pair.current;
    let (sentiment_index, sentiment) = sentiment::sentiment(
        total_score,
        current.rsi_or_neutral(),
        current.volume_ratio,
    );

    let prior_close = pair.previous.price;
    let price_change_pct = if prior_close > 0.0 {
        (current.price - prior_close) / prior_close * 100.0
    } else {
        0.0
    };

    // from_candles guarantees a last candle
    let latest = candles[candles.len() - 1];

    Ok(AnalysisResult {
        price: current.price,
        price_change_pct,
        last_candle_time: latest.time,
        high_24h: latest.high,
        low_24h: latest.low,
        volume_24h: latest.volume,
        indicators: current,
        rules,
        total_score,
        signal,
        forecast,
        sentiment_index,
        sentiment,
    })
}
