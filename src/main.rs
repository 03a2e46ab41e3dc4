use cryptovision::{app, config::Config, AppState};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cryptovision=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!("Starting CryptoVision server on {}:{}", config.host, config.port);
    info!(
        "Candle source {} ({} daily candles, cache {}s)",
        config.binance_api_url, config.kline_limit, config.candle_cache_ttl_secs
    );
    match config.forecast_service_url {
        Some(ref url) => info!("External forecast service: {}", url),
        None => info!("No forecast service configured, using statistical forecast"),
    }

    let addr = config.bind_addr();
    let state = AppState::new(config);

    // Sweep candle histories nobody re-requested
    let analysis_service = state.analysis_service.clone();
    tokio::spawn(async move {
        let period = analysis_service.cache_ttl().max(Duration::from_secs(1));
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            analysis_service.purge_expired_candles();
        }
    });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("CryptoVision server listening on {}", addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
