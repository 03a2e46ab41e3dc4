//! Integration tests for API endpoints

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use cryptovision::{app, config::Config, types::Candle, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Config pointing the exchange at a closed local port.
fn test_app() -> Router {
    app(AppState::new(Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        binance_api_url: "http://127.0.0.1:9".to_string(),
        binance_api_key: None,
        forecast_service_url: None,
        kline_limit: 90,
        candle_cache_ttl_secs: 300,
        http_timeout_secs: 1,
    }))
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = test_app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn get(uri: &str) -> (StatusCode, Value) {
    send(Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

fn rising_candles(count: usize) -> Vec<Candle> {
    (0..count)
        .map(|i| {
            let wobble = match (i + 1) % 3 {
                0 => 4.0,
                1 => -4.0,
                _ => 0.0,
            };
            let close = 100.0 + i as f64 + wobble;
            Candle::new(i as i64 * 86_400_000, close, close + 1.0, close - 1.0, close, 1000.0)
        })
        .collect()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get("/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_assets() {
    let (status, body) = get("/api/assets").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["cached"], false);

    let symbols: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["symbol"].as_str().unwrap())
        .collect();
    assert_eq!(symbols, vec!["BTC", "ETH", "SOL", "XRP"]);
}

#[tokio::test]
async fn test_post_analysis() {
    let (status, body) = post_json(
        "/api/analysis",
        json!({ "candles": rising_candles(90), "forecastPct": 3.0 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["rules"].as_array().unwrap().len(), 10);
    assert_eq!(data["forecast"]["source"], "external");
    assert_eq!(data["forecast"]["changePct"], 3.0);
    assert!(data["sentimentIndex"].as_u64().unwrap() <= 100);
    assert!(data["signal"].is_string());
}

#[tokio::test]
async fn test_post_analysis_without_forecast() {
    let (status, body) = post_json("/api/analysis", json!({ "candles": rising_candles(10) })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["forecast"]["source"], "statistical");
    assert!(body["data"]["indicators"]["rsi"].is_null());
}

#[tokio::test]
async fn test_post_analysis_single_candle() {
    let (status, body) = post_json("/api/analysis", json!({ "candles": rising_candles(1) })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], 422);
    assert!(body["error"].as_str().unwrap().contains("at least 2 candles"));
}

#[tokio::test]
async fn test_post_analysis_malformed_body() {
    let (status, _) = post_json("/api/analysis", json!({ "candles": "nope" })).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_unknown_asset() {
    let (status, body) = get("/api/analysis/doge").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);

    let (status, _) = get("/api/price/doge/latest").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_exchange_unavailable() {
    let (status, body) = get("/api/analysis/btc").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["status"], 502);

    let (status, _) = get("/api/prices/eth").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_post_analysis_out_of_order() {
    let mut candles = rising_candles(30);
    candles.swap(5, 6);
    let (status, body) = post_json("/api/analysis", json!({ "candles": candles })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("strictly increasing"));
}

#[tokio::test]
async fn test_prices_query_validation() {
    let (status, body) = get("/api/prices/btc?interval=1w").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body["error"].as_str().unwrap().contains("1w"));

    let (status, _) = get("/api/prices/btc?lookback=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get("/api/prices/btc?lookback=5000").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get("/api/prices/btc?lookback=lots").await;
    assert!(status.is_client_error());

    // Valid parameters get as far as the exchange
    let (status, _) = get("/api/prices/btc?interval=4h&lookback=120").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}
