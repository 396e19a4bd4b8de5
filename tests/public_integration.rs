use std::sync::Arc;

use rust_decimal::Decimal;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use coincheck_api_client::auth::{SequenceNonce, SignatureEncoding, StaticCredentials, sign};
use coincheck_api_client::error::{CoincheckError, RequestError};
use coincheck_api_client::rest::CoincheckClient;
use coincheck_api_client::types::BuySell;

fn build_public_client(server: &MockServer) -> CoincheckClient {
    CoincheckClient::builder().base_url(server.uri()).build()
}

fn ticker_body() -> serde_json::Value {
    serde_json::json!({
        "last": 499500,
        "bid": 499000,
        "ask": 500000,
        "high": 510000,
        "low": 480000,
        "volume": "1234.56789012",
        "timestamp": 1_700_000_000
    })
}

#[tokio::test]
async fn test_get_ticker() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/ticker"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ticker_body()))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let ticker = client.get_ticker().await.unwrap();

    assert_eq!(ticker.ask, 500000.0);
    assert_eq!(ticker.bid, 499000.0);
    assert_eq!(ticker.volume.to_string(), "1234.56789012");
    assert_eq!(ticker.timestamp, 1_700_000_000);
}

#[tokio::test]
async fn test_public_request_unsigned_without_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/ticker"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ticker_body()))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    client.get_ticker().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("access-key").is_none());
    assert!(requests[0].headers.get("access-signature").is_none());
}

#[tokio::test]
async fn test_public_request_signed_with_credentials() {
    let server = MockServer::start().await;
    let uri = format!("{}/api/ticker", server.uri());
    let expected = sign("test_secret", 42, &uri, "", SignatureEncoding::Hex).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/ticker"))
        .and(header("ACCESS-KEY", "test_key"))
        .and(header("ACCESS-NONCE", "42"))
        .and(header("ACCESS-SIGNATURE", expected.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(ticker_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = CoincheckClient::builder()
        .base_url(server.uri())
        .credentials(Arc::new(StaticCredentials::new("test_key", "test_secret")))
        .nonce_provider(Arc::new(SequenceNonce::starting_at(42)))
        .build();

    client.get_ticker().await.unwrap();
}

#[tokio::test]
async fn test_get_trades_bare_array() {
    let server = MockServer::start().await;
    let response = serde_json::json!([
        {
            "id": 82,
            "amount": "0.28391",
            "rate": 35400,
            "order_type": "sell",
            "created_at": "2015-01-10T05:55:38.000Z"
        },
        {
            "id": 81,
            "amount": "0.1",
            "rate": "35390.0",
            "order_type": "buy",
            "created_at": "2015-01-09T15:25:13.000Z"
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/api/trades"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let trades = client.get_trades().await.unwrap();

    assert_eq!(trades.len(), 2);
    assert_eq!(trades[0].id, 82);
    assert_eq!(trades[0].rate, Decimal::from(35400));
    assert_eq!(trades[1].order_type, BuySell::Buy);
    assert_eq!(trades[1].rate.to_string(), "35390.0");
}

#[tokio::test]
async fn test_get_trades_paginated() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "success": true,
        "pagination": {"limit": 1, "order": "desc", "starting_after": null, "ending_before": null},
        "data": [{
            "id": 82,
            "amount": "0.28391",
            "rate": "35400.0",
            "pair": "btc_jpy",
            "order_type": "sell",
            "created_at": "2015-01-10T05:55:38.000Z"
        }]
    });

    Mock::given(method("GET"))
        .and(path("/api/trades"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let trades = client.get_trades().await.unwrap();

    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].pair.as_deref(), Some("btc_jpy"));
}

#[tokio::test]
async fn test_get_trades_paginated_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trades"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "error": "pair is invalid"
        })))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let err = client.get_trades().await.unwrap_err();

    assert_eq!(err.api_error().unwrap().message, "pair is invalid");
}

#[tokio::test]
async fn test_get_order_book() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "asks": [["27330.0", "2.25"], ["27340.0", "0.45"]],
        "bids": [["27240.0", "1.1543"], ["26800.0", "1.2"]]
    });

    Mock::given(method("GET"))
        .and(path("/api/order_books"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let book = client.get_order_book().await.unwrap();

    assert_eq!(book.asks.len(), 2);
    assert_eq!(book.bids.len(), 2);
    assert_eq!(book.best_ask().unwrap().rate().to_string(), "27330.0");
    assert_eq!(book.best_bid().unwrap().amount().to_string(), "1.1543");
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/ticker"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let err = client.get_ticker().await.unwrap_err();

    match err {
        CoincheckError::Decode { body, .. } => assert!(body.contains("Bad Gateway")),
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_wrong_shape_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/order_books"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"asks": "none"})),
        )
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    assert!(client.get_order_book().await.unwrap_err().is_decode());
}

#[tokio::test]
async fn test_transport_failure_is_request_error() {
    // Reserve a port, then close it so nothing is listening.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = CoincheckClient::builder()
        .base_url(format!("http://{addr}"))
        .build();

    let err = client.get_ticker().await.unwrap_err();
    assert!(matches!(
        err,
        CoincheckError::Request(RequestError::Transport(_))
    ));

    let err = client.get_order_book().await.unwrap_err();
    assert!(err.is_request());
}

#[tokio::test]
async fn test_malformed_base_url_is_request_error() {
    let client = CoincheckClient::builder().base_url("no scheme here").build();

    let err = client.get_trades().await.unwrap_err();
    assert!(matches!(
        err,
        CoincheckError::Request(RequestError::InvalidUrl(_))
    ));
}
