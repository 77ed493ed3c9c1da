//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use httpmock::prelude::*;
use quote_card::config::ServiceConfig;
use quote_card::render::CardRenderer;
use quote_card::{HttpServer, Shutdown};
use serde_json::{json, Value};

pub const QUOTES_PATH: &str = "/api/quotes";
pub const PHILOSOPHERS_PATH: &str = "/api/philosophers";

/// A single quote referencing philosopher `id`.
pub fn quote(text: &str, id: Option<&str>) -> Value {
    let mut quote = json!({
        "text": text,
        "work": "Letters to Lucilius",
        "year": 65,
    });
    if let Some(id) = id {
        quote["philosopher"] = json!({ "id": id });
    }
    quote
}

/// Service config pointing at the mock upstream.
pub fn config_for(upstream: &MockServer) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.quotes_url = upstream.url(QUOTES_PATH);
    config.upstream.philosophers_url = upstream.url(PHILOSOPHERS_PATH);
    config.upstream.timeout_secs = 1;
    config
}

/// Renderer without system fonts; PNG text is skipped but images stay valid.
pub fn bare_renderer(config: &ServiceConfig) -> CardRenderer {
    CardRenderer::with_fonts(
        config.theme.clone(),
        &config.card,
        Arc::new(usvg::fontdb::Database::new()),
    )
}

/// Start the service on an ephemeral port.
pub async fn start_service(config: ServiceConfig) -> (SocketAddr, Shutdown) {
    let renderer = bare_renderer(&config);
    let server = HttpServer::with_renderer(config, renderer).unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// HTTP client that never goes through a system proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap()
}

/// Mock `GET /api/quotes` returning `body`.
pub async fn mock_quotes<'a>(upstream: &'a MockServer, body: Value) -> httpmock::Mock<'a> {
    upstream
        .mock_async(|when, then| {
            when.method(GET).path(QUOTES_PATH);
            then.status(200).json_body(body);
        })
        .await
}

/// Mock `GET /api/philosophers/{id}` returning `name`.
pub async fn mock_philosopher<'a>(
    upstream: &'a MockServer,
    id: &str,
    name: &str,
) -> httpmock::Mock<'a> {
    let path = format!("{PHILOSOPHERS_PATH}/{id}");
    let body = json!({ "id": id, "name": name });
    upstream
        .mock_async(|when, then| {
            when.method(GET).path(path);
            then.status(200).json_body(body);
        })
        .await
}
