//! Integration tests for the Yahoo chart provider against a wiremock server.

use momentum_watch::services::{MarketDataProvider, ProviderError, YahooChartProvider};
use serde_json::{json, Value};
use wiremock::matchers::{header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chart_body() -> Value {
    json!({
        "chart": {
            "result": [{
                "meta": { "symbol": "NVDA", "currency": "USD" },
                "timestamp": [1700000000, 1700000060, 1700000120, 1700000180],
                "indicators": {
                    "quote": [{
                        "open":   [100.0, 101.0, null,  102.0],
                        "high":   [101.0, 102.5, 103.0, 103.5],
                        "low":    [ 99.5, 100.5, 101.0, 101.5],
                        "close":  [100.5, 102.0, 102.5, 103.0],
                        "volume": [1200,  900,   null,  1500]
                    }]
                }
            }],
            "error": null
        }
    })
}

async fn provider_for(server: &MockServer) -> YahooChartProvider {
    YahooChartProvider::with_base_url(server.uri()).with_interval("1m")
}

#[tokio::test]
async fn fetch_history_parses_bars_and_drops_null_rows() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/NVDA"))
        .and(query_param("range", "5d"))
        .and(query_param("interval", "1m"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_body()))
        .expect(1)
        .mount(&server)
        .await;

    let bars = provider_for(&server)
        .await
        .fetch_history("NVDA", "5d")
        .await
        .expect("history parses");

    assert_eq!(bars.len(), 3);
    assert_eq!(bars[0].timestamp.timestamp(), 1_700_000_000);
    assert_eq!(bars[0].close, 100.5);
    assert_eq!(bars[0].volume, Some(1200.0));
    assert_eq!(bars[2].timestamp.timestamp(), 1_700_000_180);
    assert_eq!(bars[2].open, 102.0);
    assert!(bars.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
}

#[tokio::test]
async fn fetch_latest_bar_returns_newest_row() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/NVDA"))
        .and(query_param("range", "1d"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_body()))
        .mount(&server)
        .await;

    let latest = provider_for(&server)
        .await
        .fetch_latest_bar("NVDA")
        .await
        .expect("latest bar parses")
        .expect("bar present");

    assert_eq!(latest.timestamp.timestamp(), 1_700_000_180);
    assert_eq!(latest.close, 103.0);
}

#[tokio::test]
async fn unknown_symbol_maps_to_typed_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/NOPE"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "chart": {
                "result": null,
                "error": {
                    "code": "Not Found",
                    "description": "No data found, symbol may be delisted"
                }
            }
        })))
        .mount(&server)
        .await;

    let error = provider_for(&server)
        .await
        .fetch_history("NOPE", "1d")
        .await
        .unwrap_err();

    assert_eq!(error, ProviderError::UnknownSymbol("NOPE".to_string()));
}

#[tokio::test]
async fn api_error_payload_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/NVDA"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "chart": {
                "result": null,
                "error": {
                    "code": "Unprocessable Entity",
                    "description": "Invalid input - interval=7m is not supported"
                }
            }
        })))
        .mount(&server)
        .await;

    let error = provider_for(&server)
        .await
        .fetch_history("NVDA", "1d")
        .await
        .unwrap_err();

    assert!(matches!(error, ProviderError::Api { ref code, .. } if code == "Unprocessable Entity"));
}

#[tokio::test]
async fn server_error_maps_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/NVDA"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let error = provider_for(&server)
        .await
        .fetch_latest_bar("NVDA")
        .await
        .unwrap_err();

    assert_eq!(
        error,
        ProviderError::Status {
            symbol: "NVDA".to_string(),
            status: 500,
        }
    );
}

#[tokio::test]
async fn empty_result_means_no_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/NVDA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "chart": { "result": [], "error": null }
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    assert!(provider.fetch_history("NVDA", "1d").await.unwrap().is_empty());
    assert!(provider.fetch_latest_bar("NVDA").await.unwrap().is_none());
}

#[tokio::test]
async fn malformed_body_maps_to_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/NVDA"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&server)
        .await;

    let error = provider_for(&server)
        .await
        .fetch_history("NVDA", "1d")
        .await
        .unwrap_err();

    assert!(matches!(error, ProviderError::Parse(_)));
}

#[tokio::test]
async fn unreachable_host_maps_to_request_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let error = YahooChartProvider::with_base_url(uri)
        .fetch_history("NVDA", "1d")
        .await
        .unwrap_err();

    assert!(matches!(error, ProviderError::Request(_)));
}
