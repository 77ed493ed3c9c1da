//! Failure injection tests: upstream outages and bad payloads must still
//! produce a valid image response.

use std::time::{Duration, Instant};

use httpmock::prelude::*;
use serde_json::json;

mod common;

use common::{client, config_for, mock_quotes, quote, start_service, QUOTES_PATH};

async fn assert_svg_fallback(res: reqwest::Response) {
    assert_eq!(res.status(), 500);
    assert_eq!(res.headers()["content-type"], "image/svg+xml");
    assert_eq!(res.headers()["cache-control"], "no-store, max-age=0");
    let body = res.text().await.unwrap();
    assert!(body.starts_with("<svg"), "{body}");
    assert!(body.ends_with("</svg>"));
}

#[tokio::test]
async fn test_empty_collection_returns_fallback() {
    let upstream = MockServer::start_async().await;
    mock_quotes(&upstream, json!([])).await;

    let (addr, shutdown) = start_service(config_for(&upstream)).await;
    let res = client()
        .get(format!("http://{addr}/api/quote-of-the-day"))
        .send()
        .await
        .unwrap();

    assert_svg_fallback(res).await;
    shutdown.trigger();
}

#[tokio::test]
async fn test_upstream_error_status_returns_fallback() {
    let upstream = MockServer::start_async().await;
    let quotes = upstream
        .mock_async(|when, then| {
            when.method(GET).path(QUOTES_PATH);
            then.status(503).body("Service Unavailable");
        })
        .await;

    let (addr, shutdown) = start_service(config_for(&upstream)).await;
    let res = client()
        .get(format!("http://{addr}/api/philosopher-quote"))
        .send()
        .await
        .unwrap();

    assert_svg_fallback(res).await;
    // No retries.
    assert_eq!(quotes.hits_async().await, 1);
    shutdown.trigger();
}

#[tokio::test]
async fn test_non_array_body_returns_fallback() {
    let upstream = MockServer::start_async().await;
    mock_quotes(&upstream, json!({ "quotes": [quote("Nested", None)] })).await;

    let (addr, shutdown) = start_service(config_for(&upstream)).await;
    let res = client()
        .get(format!("http://{addr}/api/philosopher-quote"))
        .send()
        .await
        .unwrap();

    assert_svg_fallback(res).await;
    shutdown.trigger();
}

#[tokio::test]
async fn test_malformed_json_returns_fallback() {
    let upstream = MockServer::start_async().await;
    upstream
        .mock_async(|when, then| {
            when.method(GET).path(QUOTES_PATH);
            then.status(200)
                .header("content-type", "application/json")
                .body("[{\"text\": \"unterminated");
        })
        .await;

    let (addr, shutdown) = start_service(config_for(&upstream)).await;
    let res = client()
        .get(format!("http://{addr}/api/philosopher-quote"))
        .send()
        .await
        .unwrap();

    assert_svg_fallback(res).await;
    shutdown.trigger();
}

#[tokio::test]
async fn test_quote_missing_text_returns_fallback() {
    let upstream = MockServer::start_async().await;
    mock_quotes(&upstream, json!([{ "work": "Republic" }])).await;

    let (addr, shutdown) = start_service(config_for(&upstream)).await;
    let res = client()
        .get(format!("http://{addr}/api/philosopher-quote"))
        .send()
        .await
        .unwrap();

    assert_svg_fallback(res).await;
    shutdown.trigger();
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let upstream = MockServer::start_async().await;
    upstream
        .mock_async(|when, then| {
            when.method(GET).path(QUOTES_PATH);
            then.status(200)
                .delay(Duration::from_secs(5))
                .json_body(json!([quote("Too late", None)]));
        })
        .await;

    // config_for sets a 1 second upstream timeout.
    let (addr, shutdown) = start_service(config_for(&upstream)).await;
    let start = Instant::now();
    let res = client()
        .get(format!("http://{addr}/api/philosopher-quote"))
        .send()
        .await
        .unwrap();

    assert!(start.elapsed() < Duration::from_secs(4));
    assert_svg_fallback(res).await;
    shutdown.trigger();
}

#[tokio::test]
async fn test_request_deadline_returns_fallback_card() {
    let upstream = MockServer::start_async().await;
    upstream
        .mock_async(|when, then| {
            when.method(GET).path(QUOTES_PATH);
            then.status(200)
                .delay(Duration::from_secs(4))
                .json_body(json!([quote("Too late", None)]));
        })
        .await;

    // The upstream client would wait, but the inbound deadline is shorter.
    let mut config = config_for(&upstream);
    config.upstream.timeout_secs = 5;
    config.timeouts.request_secs = 2;

    let (addr, shutdown) = start_service(config).await;
    let start = Instant::now();
    let res = client()
        .get(format!("http://{addr}/api/quote-of-the-day"))
        .send()
        .await
        .unwrap();

    assert!(start.elapsed() < Duration::from_secs(2));
    assert_svg_fallback(res).await;

    let res = client()
        .get(format!("http://{addr}/api/quote-of-the-day.png"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 500);
    assert_eq!(res.headers()["content-type"], "image/png");
    assert!(res.bytes().await.unwrap().starts_with(b"\x89PNG"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_unreachable_upstream_png_fallback() {
    // Grab a free port, then close it so nothing is listening.
    let dead = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let dead_addr = dead.local_addr().unwrap();
    drop(dead);

    let upstream = MockServer::start_async().await;
    let mut config = config_for(&upstream);
    config.upstream.quotes_url = format!("http://{dead_addr}/api/quotes");

    let (addr, shutdown) = start_service(config).await;
    let res = client()
        .get(format!("http://{addr}/api/philosopher-quote.png"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);
    assert_eq!(res.headers()["content-type"], "image/png");
    let bytes = res.bytes().await.unwrap();
    assert!(bytes.starts_with(b"\x89PNG"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_philosopher_failure_is_not_fatal() {
    let upstream = MockServer::start_async().await;
    mock_quotes(&upstream, json!([quote("We suffer more in imagination than in reality.", Some("7"))])).await;
    let philosopher = upstream
        .mock_async(|when, then| {
            when.method(GET).path("/api/philosophers/7");
            then.status(500);
        })
        .await;

    let (addr, shutdown) = start_service(config_for(&upstream)).await;
    let res = client()
        .get(format!("http://{addr}/api/philosopher-quote"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body = res.text().await.unwrap();
    assert!(body.contains("— Unknown Philosopher"));
    assert!(body.contains("imagination"));
    philosopher.assert_async().await;

    shutdown.trigger();
}

#[tokio::test]
async fn test_malformed_philosopher_is_not_fatal() {
    let upstream = MockServer::start_async().await;
    mock_quotes(&upstream, json!([quote("Man is the measure of all things.", Some("p"))])).await;
    upstream
        .mock_async(|when, then| {
            when.method(GET).path("/api/philosophers/p");
            then.status(200).json_body(json!({ "title": "no name here" }));
        })
        .await;

    let (addr, shutdown) = start_service(config_for(&upstream)).await;
    let res = client()
        .get(format!("http://{addr}/api/philosopher-quote.png"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-type"], "image/png");

    shutdown.trigger();
}
