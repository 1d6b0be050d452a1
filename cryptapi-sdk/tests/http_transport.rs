use std::time::Duration;

use cryptapi_sdk::{ClientConfig, CryptApiClient, CryptApiError, PaymentSession, QueryParams};
use serde_json::json;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

async fn client_for(server: &MockServer) -> CryptApiClient {
    init_tracing();
    CryptApiClient::new(&ClientConfig::new(server.uri()).with_timeout_secs(5)).unwrap()
}

fn session() -> PaymentSession {
    PaymentSession::new(
        "btc",
        "bc1qcpxcm8cf52uv865j6qugl82twgy0lz88sfrpk4",
        "https://shop.example.com/callback",
        QueryParams::new().with("order_id", "12345"),
        QueryParams::new().with("multi_chain", true),
    )
}

#[tokio::test]
async fn test_generate_address_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/btc/create/"))
        .and(header("referer", server.uri().as_str()))
        .and(query_param("address", "bc1qcpxcm8cf52uv865j6qugl82twgy0lz88sfrpk4"))
        .and(query_param("multi_chain", "1"))
        .and(query_param(
            "callback",
            "https%3A%2F%2Fshop.example.com%2Fcallback%3Forder_id%3D12345",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "address_in": "1ABCxyz",
            "address_out": "bc1qcpxcm8cf52uv865j6qugl82twgy0lz88sfrpk4",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let mut session = session();
    let address = client.generate_address(&mut session).await.unwrap();

    assert_eq!(address, "1ABCxyz");
    assert_eq!(session.payment_address(), Some("1ABCxyz"));
}

#[tokio::test]
async fn test_error_status_body_is_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/btc/logs/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "status": "error",
            "error": "Callback URL not found",
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;

    match client.check_logs(&session()).await {
        Err(CryptApiError::LogsUnavailable(msg)) => assert_eq!(msg, "Callback URL not found"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_token_coin_path_and_info() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/info/"))
        .and(query_param("price", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "btc": {"ticker": "btc", "coin": "Bitcoin"},
            "polygon": {"usdt": {"ticker": "usdt", "coin": "Tether"}},
            "fee_tiers": [{"minimum": "0", "fee": "0.01"}],
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/polygon/usdt/convert/"))
        .and(query_param("value", "25"))
        .and(query_param("from", "EUR"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "value_coin": "27.1",
            "exchange_rate": "1.084",
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;

    let coins = client.list_coins().await.unwrap();
    assert!(coins.contains_key("btc"));
    assert_eq!(coins["polygon_usdt"]["coin"], "Tether");

    let converted = client.convert("polygon_usdt", 25, "EUR").await.unwrap();
    assert_eq!(converted["value_coin"], "27.1");
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;

    match client.estimate_fee("btc", 1, "default").await {
        Err(CryptApiError::Decode(msg)) => assert!(msg.contains("502")),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_non_object_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["btc", "eth"])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;

    assert!(matches!(
        client.coin_info("btc").await,
        Err(CryptApiError::Decode(_))
    ));
}

#[tokio::test]
async fn test_connection_failure_is_network_error() {
    init_tracing();
    // Nothing listens on port 1.
    let client = CryptApiClient::new(&ClientConfig::new("http://127.0.0.1:1")).unwrap();

    assert!(matches!(
        client.convert("btc", 1, "USD").await,
        Err(CryptApiError::Network(_))
    ));
}

#[tokio::test]
async fn test_request_deadline_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/btc/convert/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "success", "value_coin": "0.01"}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    init_tracing();
    let client =
        CryptApiClient::new(&ClientConfig::new(server.uri()).with_timeout_secs(1)).unwrap();

    match client.convert("btc", 1, "USD").await {
        Err(CryptApiError::Network(err)) => assert!(err.is_timeout()),
        other => panic!("unexpected result: {other:?}"),
    }
}
