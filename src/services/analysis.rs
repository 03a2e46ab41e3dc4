//! Symbol-level analysis: candle retrieval, forecast lookup and the signal
//! engine glued together for the API.

use tracing::{debug, info};

use super::cache::{CandleKey, TtlCache};
use super::signals;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::sources::{BinanceClient, ForecastClient};
use crate::types::{
    AnalysisResult, Asset, Candle, KlineInterval, PriceHistory, PriceSummary, SymbolAnalysis,
    Ticker24h,
};
use std::time::Duration;

/// Most candles served in a price history.
pub const MAX_PRICE_POINTS: usize = 200;

/// Largest kline page the exchange returns.
pub const MAX_KLINE_LIMIT: u32 = 1000;

/// Analysis service.
pub struct AnalysisService {
    binance: BinanceClient,
    forecast: Option<ForecastClient>,
    candle_cache: TtlCache<CandleKey, Vec<Candle>>,
    kline_limit: u32,
}

impl AnalysisService {
    pub fn new(config: &Config) -> Self {
        let timeout = config.http_timeout();
        Self {
            binance: BinanceClient::new(
                config.binance_api_url.clone(),
                config.binance_api_key.clone(),
                timeout,
            ),
            forecast: config
                .forecast_service_url
                .as_ref()
                .map(|url| ForecastClient::new(url.clone(), timeout)),
            candle_cache: TtlCache::new(config.candle_cache_ttl()),
            kline_limit: config.kline_limit,
        }
    }

    /// Resolve a symbol from the catalogue.
    pub fn asset(symbol: &str) -> Result<&'static Asset> {
        Asset::find(symbol)
            .ok_or_else(|| AppError::NotFound(format!("Unsupported asset: {}", symbol)))
    }

    /// How long fetched candles stay fresh.
    pub fn cache_ttl(&self) -> Duration {
        self.candle_cache.ttl()
    }

    /// Drop stale candle histories that were never read again.
    pub fn purge_expired_candles(&self) {
        let before = self.candle_cache.len();
        self.candle_cache.purge_expired();
        let purged = before.saturating_sub(self.candle_cache.len());
        if purged > 0 {
            debug!("Purged {} stale candle histories", purged);
        }
    }

    /// Candles for `asset`, and whether they came from the cache.
    pub async fn candles(
        &self,
        asset: &Asset,
        interval: KlineInterval,
        limit: u32,
    ) -> Result<(Vec<Candle>, bool)> {
        let key = CandleKey::new(asset.pair, interval.as_str(), limit);
        if let Some(candles) = self.candle_cache.get(&key) {
            debug!("Candle cache hit: {} {}", asset.pair, interval.as_str());
            return Ok((candles, true));
        }

        let candles = self
            .binance
            .fetch_klines(asset.pair, interval, limit)
            .await
            .map_err(|e| AppError::ExternalApi(format!("{}: {}", asset.pair, e)))?;

        info!(
            "Fetched {} {} candles for {}",
            candles.len(),
            interval.as_str(),
            asset.pair
        );
        self.candle_cache.insert(key, candles.clone());
        Ok((candles, false))
    }

    /// Candle history with its indicator overlay and a summary of the
    /// latest reading. Only the newest `MAX_PRICE_POINTS` candles are
    /// returned, but indicators see the whole history.
    pub async fn price_history(
        &self,
        asset: &Asset,
        interval: KlineInterval,
        limit: u32,
    ) -> Result<(PriceHistory, bool)> {
        if limit == 0 || limit > MAX_KLINE_LIMIT {
            return Err(AppError::BadRequest(format!(
                "lookback must be between 1 and {}, got {}",
                MAX_KLINE_LIMIT, limit
            )));
        }

        let (candles, cached) = self.candles(asset, interval, limit).await?;

        let summary = if candles.len() >= signals::MIN_CANDLES {
            Some(PriceSummary::from_analysis(&signals::analyze(&candles, None)?))
        } else {
            None
        };

        let mut data = signals::overlay(&candles);
        let data = data.split_off(data.len().saturating_sub(MAX_PRICE_POINTS));

        Ok((
            PriceHistory {
                symbol: asset.symbol.to_string(),
                interval,
                data_points: candles.len(),
                latest_price: candles.last().map(|c| c.close),
                summary,
                data,
            },
            cached,
        ))
    }

    pub async fn ticker(&self, asset: &Asset) -> Result<Ticker24h> {
        self.binance
            .fetch_ticker(asset.pair)
            .await
            .map_err(|e| AppError::ExternalApi(format!("{}: {}", asset.pair, e)))
    }

    /// Fetch candles and the external forecast, then run the engine.
    pub async fn analyze_symbol(&self, asset: &Asset) -> Result<(SymbolAnalysis, bool)> {
        let forecast = async {
            match &self.forecast {
                Some(client) => client.predicted_change_pct(asset.symbol).await,
                None => None,
            }
        };
        let (candles, forecast_pct) = tokio::join!(
            self.candles(asset, KlineInterval::OneDay, self.kline_limit),
            forecast
        );
        let (candles, cached) = candles?;

        let analysis = Self::analyze_candles(&candles, forecast_pct)?;
        info!(
            "{} analysis: {} (score {:.1}, sentiment {}, {} candles)",
            asset.symbol,
            analysis.signal.label(),
            analysis.total_score,
            analysis.sentiment.name(),
            candles.len()
        );

        Ok((
            SymbolAnalysis {
                symbol: asset.symbol.to_string(),
                name: asset.name.to_string(),
                analysis,
                computed_at: chrono::Utc::now().timestamp_millis(),
            },
            cached,
        ))
    }

    /// Run the engine on caller-supplied candles.
    pub fn analyze_candles(
        candles: &[Candle],
        forecast_pct: Option<f64>,
    ) -> Result<AnalysisResult> {
        Ok(signals::analyze(candles, forecast_pct)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            binance_api_url: "http://127.0.0.1:9".to_string(),
            binance_api_key: None,
            forecast_service_url: None,
            kline_limit: 90,
            candle_cache_ttl_secs: 300,
            http_timeout_secs: 1,
        }
    }

    #[test]
    fn test_asset_lookup() {
        assert_eq!(AnalysisService::asset("sol").unwrap().pair, "SOLUSDT");
        assert!(matches!(
            AnalysisService::asset("doge"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_analyze_candles_short_input() {
        let result = AnalysisService::analyze_candles(&[], None);
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_cached_candles_are_served() {
        let service = AnalysisService::new(&test_config());
        let asset = AnalysisService::asset("BTC").unwrap();
        let candles = vec![Candle::new(0, 1.0, 1.0, 1.0, 1.0, 1.0); 3];
        service
            .candle_cache
            .insert(CandleKey::new(asset.pair, "1d", 90), candles.clone());

        let (served, cached) =
            tokio_test::block_on(service.candles(asset, KlineInterval::OneDay, 90)).unwrap();
        assert!(cached);
        assert_eq!(served, candles);
    }

    #[test]
    fn test_cache_keyed_by_interval_and_limit() {
        let service = AnalysisService::new(&test_config());
        let asset = AnalysisService::asset("BTC").unwrap();
        service.candle_cache.insert(
            CandleKey::new(asset.pair, "4h", 90),
            vec![Candle::new(0, 1.0, 1.0, 1.0, 1.0, 1.0)],
        );

        let hourly = tokio_test::block_on(service.candles(asset, KlineInterval::OneHour, 90));
        assert!(matches!(hourly, Err(AppError::ExternalApi(_))));
        let shorter = tokio_test::block_on(service.candles(asset, KlineInterval::FourHours, 30));
        assert!(matches!(shorter, Err(AppError::ExternalApi(_))));
    }

    #[test]
    fn test_unreachable_exchange_is_external_error() {
        let service = AnalysisService::new(&test_config());
        let asset = AnalysisService::asset("ETH").unwrap();
        let result = tokio_test::block_on(service.candles(asset, KlineInterval::OneDay, 90));
        assert!(matches!(result, Err(AppError::ExternalApi(_))));
    }

    #[test]
    fn test_price_history_lookback_bounds() {
        let service = AnalysisService::new(&test_config());
        let asset = AnalysisService::asset("SOL").unwrap();

        for limit in [0, MAX_KLINE_LIMIT + 1] {
            let result =
                tokio_test::block_on(service.price_history(asset, KlineInterval::OneDay, limit));
            assert!(matches!(result, Err(AppError::BadRequest(_))));
        }
    }

    #[test]
    fn test_price_history_from_cache() {
        let service = AnalysisService::new(&test_config());
        let asset = AnalysisService::asset("XRP").unwrap();
        let candles: Vec<Candle> = (0..250)
            .map(|i| {
                let close = 0.5 + (i % 7) as f64 * 0.01;
                Candle::new(i * 14_400_000, close, close + 0.02, close - 0.02, close, 1e6)
            })
            .collect();
        service
            .candle_cache
            .insert(CandleKey::new(asset.pair, "4h", 250), candles.clone());

        let (history, cached) = tokio_test::block_on(service.price_history(
            asset,
            KlineInterval::FourHours,
            250,
        ))
        .unwrap();

        assert!(cached);
        assert_eq!(history.symbol, "XRP");
        assert_eq!(history.interval, KlineInterval::FourHours);
        assert_eq!(history.data_points, 250);
        assert_eq!(history.data.len(), MAX_PRICE_POINTS);
        assert_eq!(history.data[0].candle, candles[50]);
        assert_eq!(history.latest_price, Some(candles[249].close));

        let summary = history.summary.unwrap();
        assert_eq!(summary.price, candles[249].close);
        assert!(summary.bb_width.unwrap() > 0.0);
    }

    #[test]
    fn test_purge_expired_candles() {
        let mut config = test_config();
        config.candle_cache_ttl_secs = 0;
        let service = AnalysisService::new(&config);
        assert_eq!(service.cache_ttl(), Duration::ZERO);

        service
            .candle_cache
            .insert(CandleKey::new("BTCUSDT", "1d", 90), Vec::new());
        service.purge_expired_candles();
        assert!(service.candle_cache.is_empty());
    }
}
