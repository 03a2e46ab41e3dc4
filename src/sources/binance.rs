use crate::types::{Candle, KlineInterval, Ticker24h};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Binance 24hr ticker response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BinanceTicker {
    symbol: String,
    last_price: String,
    price_change_percent: String,
    high_price: String,
    low_price: String,
    volume: String,
    quote_volume: String,
}

impl BinanceTicker {
    fn into_ticker(self, timestamp: i64) -> Ticker24h {
        let parse = |s: &str| s.parse::<f64>().unwrap_or(0.0);
        Ticker24h {
            price: parse(&self.last_price),
            change_pct: parse(&self.price_change_percent),
            high: parse(&self.high_price),
            low: parse(&self.low_price),
            volume: parse(&self.volume),
            quote_volume: parse(&self.quote_volume),
            symbol: self.symbol,
            timestamp,
        }
    }
}

/// Read a kline field that Binance sends either as a string or a number.
fn kline_number(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

/// Convert one kline row `[openTime, open, high, low, close, volume, ...]`.
fn parse_kline(row: &[Value]) -> Option<Candle> {
    if row.len() < 6 {
        return None;
    }
    Some(Candle {
        time: row[0].as_i64()?,
        open: kline_number(&row[1])?,
        high: kline_number(&row[2])?,
        low: kline_number(&row[3])?,
        close: kline_number(&row[4])?,
        volume: kline_number(&row[5])?,
    })
}

/// First `max` characters of `text`, for logging response bodies.
fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Parse a klines payload, dropping malformed rows.
pub fn parse_klines(rows: &[Vec<Value>]) -> Vec<Candle> {
    let candles: Vec<Candle> = rows.iter().filter_map(|row| parse_kline(row)).collect();
    if candles.len() < rows.len() {
        warn!(
            "Dropped {} malformed kline rows",
            rows.len() - candles.len()
        );
    }
    candles
}

/// Binance REST client.
#[derive(Clone)]
pub struct BinanceClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl BinanceClient {
    /// Create a new Binance client.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .user_agent("CryptoVision/1.0")
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> anyhow::Result<T> {
        let url = format!("{}/{}", self.base_url, path);

        let mut request = self.client.get(&url).query(query);
        if let Some(ref key) = self.api_key {
            request = request.header("X-MBX-APIKEY", key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(
                "Binance API returned {}: {}",
                status,
                truncate_chars(&text, 200)
            );
            return Err(anyhow::anyhow!("Binance API error: {}", status));
        }

        Ok(response.json().await?)
    }

    /// Fetch the most recent `limit` candles for `pair`, oldest first.
    pub async fn fetch_klines(
        &self,
        pair: &str,
        interval: KlineInterval,
        limit: u32,
    ) -> anyhow::Result<Vec<Candle>> {
        let rows: Vec<Vec<Value>> = self
            .get_json(
                "klines",
                &[
                    ("symbol", pair.to_string()),
                    ("interval", interval.as_str().to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;

        let candles = parse_klines(&rows);
        debug!("Binance klines: {} {} x{}", pair, interval.as_str(), candles.len());
        Ok(candles)
    }

    /// Fetch the rolling 24h ticker for `pair`.
    pub async fn fetch_ticker(&self, pair: &str) -> anyhow::Result<Ticker24h> {
        let ticker: BinanceTicker = self
            .get_json("ticker/24hr", &[("symbol", pair.to_string())])
            .await?;
        debug!("Binance ticker: {} = {}", ticker.symbol, ticker.last_price);
        Ok(ticker.into_ticker(chrono::Utc::now().timestamp_millis()))
    }
}
