use std::time::Duration;

use serde_json::json;
use stock::{MarketState, QuoteClient, QuoteError, QuoteProvider};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> QuoteClient {
    QuoteClient::new(server.uri(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn fetches_batch_in_one_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v7/finance/quote"))
        .and(query_param("symbols", "ETH-USD,SHOP.TO"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "quoteResponse": {
                "result": [
                    {
                        "symbol": "ETH-USD",
                        "regularMarketPrice": 2500.12,
                        "regularMarketChange": 12.5,
                        "regularMarketChangePercent": 0.5,
                        "currency": "USD",
                        "shortName": "Ethereum USD",
                        "marketState": "REGULAR"
                    },
                    {
                        "symbol": "SHOP.TO",
                        "regularMarketPrice": 101.5,
                        "marketState": "PRE",
                        "preMarketPrice": 102.0
                    }
                ],
                "error": null
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let symbols = vec!["ETH-USD".to_string(), "SHOP.TO".to_string()];
    let records = client(&server).quote(&symbols).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].symbol, "ETH-USD");
    assert_eq!(records[0].regular_market_price, Some(2500.12));
    assert_eq!(records[1].market_state, Some(MarketState::Pre));
    assert_eq!(records[1].pre_market_price, Some(102.0));
}

#[tokio::test]
async fn provider_error_body_fails_batch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v7/finance/quote"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "quoteResponse": {
                "result": null,
                "error": { "code": "Bad Request", "description": "Invalid symbols" }
            }
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .quote(&["???".to_string()])
        .await
        .unwrap_err();

    match err {
        QuoteError::Api { code, description } => {
            assert_eq!(code, "Bad Request");
            assert_eq!(description, "Invalid symbols");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn http_status_fails_batch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v7/finance/quote"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client(&server)
        .quote(&["AAPL".to_string()])
        .await
        .unwrap_err();

    assert!(matches!(err, QuoteError::Http(_)));
}

#[tokio::test]
async fn unknown_symbols_come_back_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v7/finance/quote"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "quoteResponse": { "result": [], "error": null }
        })))
        .mount(&server)
        .await;

    let records = client(&server)
        .quote(&["NONEXISTENTTICKER123".to_string()])
        .await
        .unwrap();

    assert!(records.is_empty());
}

#[tokio::test]
async fn lookup_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v7/finance/quote"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "quoteResponse": {
                "result": [{ "symbol": "BTC-USD", "regularMarketPrice": 0.004 }],
                "error": null
            }
        })))
        .mount(&server)
        .await;

    let lookups = stock::lookup(&client(&server), &["BTC-USD".to_string(), "NOPE".to_string()])
        .await
        .unwrap();

    assert!(matches!(&lookups[0], stock::Lookup::Found(q) if q.price == "4.00e-3"));
    assert_eq!(lookups[1], stock::Lookup::NotFound("NOPE".to_string()));
}
