use serde::{Deserialize, Serialize};

use super::PriceSummary;

/// Kline interval supported by the market-data endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum KlineInterval {
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "1d")]
    #[default]
    OneDay,
}

impl KlineInterval {
    /// Parse an interval from its exchange code.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "1h" => Some(KlineInterval::OneHour),
            "4h" => Some(KlineInterval::FourHours),
            "1d" => Some(KlineInterval::OneDay),
            _ => None,
        }
    }

    /// Exchange code for this interval.
    pub fn as_str(&self) -> &'static str {
        match self {
            KlineInterval::OneHour => "1h",
            KlineInterval::FourHours => "4h",
            KlineInterval::OneDay => "1d",
        }
    }
}

/// One OHLCV candle. `time` is the open time in Unix milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(time: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// A candle with the chart indicators evaluated at its index.
///
/// RSI and the Bollinger values are omitted until enough history exists;
/// the seeded EMAs, MACD and ATR have a value from the first candle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandleIndicators {
    #[serde(flatten)]
    pub candle: Candle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
    pub macd: f64,
    pub macd_signal: f64,
    pub macd_hist: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bb_upper: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bb_middle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bb_lower: Option<f64>,
    pub ema_20: f64,
    pub ema_50: f64,
    pub ema_200: f64,
    pub atr: f64,
}

/// Price history for a symbol with its indicator overlay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceHistory {
    pub symbol: String,
    pub interval: KlineInterval,
    /// Candles fetched, which can exceed `data.len()`.
    pub data_points: usize,
    pub latest_price: Option<f64>,
    pub summary: Option<PriceSummary>,
    pub data: Vec<CandleIndicators>,
}

/// 24-hour rolling ticker snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker24h {
    pub symbol: String,
    pub price: f64,
    pub change_pct: f64,
    pub high: f64,
    pub low: f64,
    pub volume: f64,
    pub quote_volume: f64,
    /// Unix timestamp (milliseconds) when fetched.
    pub timestamp: i64,
}
