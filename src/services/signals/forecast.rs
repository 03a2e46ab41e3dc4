//! Short-horizon price projection.

use crate::types::{Forecast, ForecastSource};

/// Periods ahead the forecast targets.
pub const HORIZON: u32 = 7;

/// Trailing closes whose log returns feed the projection.
const RETURN_WINDOW: usize = 30;

/// Width of the uncertainty band in standard deviations.
const BAND_SIGMAS: f64 = 1.5;

/// Projected change is clamped to this many percent either way.
const MAX_CHANGE_PCT: f64 = 50.0;

/// Band applied around an externally supplied point forecast.
const OVERRIDE_BAND: f64 = 0.05;

/// Log returns over the trailing window. Pairs with a non-positive close
/// are skipped.
fn log_returns(closes: &[f64]) -> Vec<f64> {
    let start = closes.len().saturating_sub(RETURN_WINDOW).max(1);
    (start..closes.len())
        .filter_map(|i| {
            let (prev, cur) = (closes[i - 1], closes[i]);
            (prev > 0.0 && cur > 0.0).then(|| (cur / prev).ln())
        })
        .collect()
}

/// Recency-weighted mean (weights 1..=m) and the deviation around it.
fn weighted_moments(returns: &[f64]) -> (f64, f64) {
    if returns.is_empty() {
        return (0.0, 0.0);
    }

    let weight_sum: f64 = (1..=returns.len()).map(|w| w as f64).sum();
    let mean = returns
        .iter()
        .enumerate()
        .map(|(j, r)| r * (j + 1) as f64)
        .sum::<f64>()
        / weight_sum;
    let variance =
        returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / returns.len() as f64;

    (mean, variance.sqrt())
}

/// Drift-and-volatility projection from the closing prices.
pub fn statistical(closes: &[f64]) -> Forecast {
    let price = closes.last().copied().unwrap_or(0.0);
    let (drift, volatility) = weighted_moments(&log_returns(closes));

    let horizon = HORIZON as f64;
    let spread = BAND_SIGMAS * volatility * horizon.sqrt();
    let point = price * (horizon * drift).exp();
    let change_pct = if price > 0.0 {
        (100.0 * (point - price) / price).clamp(-MAX_CHANGE_PCT, MAX_CHANGE_PCT)
    } else {
        0.0
    };

    Forecast {
        horizon: HORIZON,
        point,
        upper_bound: price * (horizon * drift + spread).exp(),
        lower_bound: price * (horizon * drift - spread).exp(),
        change_pct,
        source: ForecastSource::Statistical,
    }
}

/// Point forecast from an externally predicted percentage change.
pub fn from_external(price: f64, change_pct: f64) -> Forecast {
    let point = price * (1.0 + change_pct / 100.0);
    Forecast {
        horizon: HORIZON,
        point,
        upper_bound: point * (1.0 + OVERRIDE_BAND),
        lower_bound: point * (1.0 - OVERRIDE_BAND),
        change_pct,
        source: ForecastSource::External,
    }
}

/// Use the override when it is finite and non-zero, the statistical
/// projection otherwise.
pub fn forecast(closes: &[f64], override_pct: Option<f64>) -> Forecast {
    match override_pct {
        Some(pct) if pct.is_finite() && pct != 0.0 => {
            from_external(closes.last().copied().unwrap_or(0.0), pct)
        }
        _ => statistical(closes),
    }
}
