use std::env;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Binance REST base URL.
    pub binance_api_url: String,
    /// Binance API key (optional, public endpoints work without).
    pub binance_api_key: Option<String>,
    /// Base URL of the external price-prediction service, if any.
    pub forecast_service_url: Option<String>,
    /// Daily candles fetched per analysis.
    pub kline_limit: u32,
    /// How long fetched candles are reused (seconds).
    pub candle_cache_ttl_secs: u64,
    /// Timeout for outbound HTTP requests (seconds).
    pub http_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            binance_api_url: env::var("BINANCE_API_URL")
                .unwrap_or_else(|_| "https://api.binance.com/api/v3".to_string()),
            binance_api_key: env::var("BINANCE_API_KEY").ok().filter(|k| !k.is_empty()),
            forecast_service_url: env::var("FORECAST_SERVICE_URL")
                .ok()
                .filter(|u| !u.is_empty())
                .map(|u| u.trim_end_matches('/').to_string()),
            kline_limit: env::var("KLINE_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(90),
            candle_cache_ttl_secs: env::var("CANDLE_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }

    pub fn candle_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.candle_cache_ttl_secs)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Address the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
