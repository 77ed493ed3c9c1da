//! Quote card handlers.

use std::time::Instant;

use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{CardError, CardResult};
use crate::http::request::request_id;
use crate::http::response::{self, CachePolicy};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::quoting::SelectionPolicy;
use crate::render::{OutputFormat, RenderedImage};

/// One card route: how the quote is picked and how it is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardRoute {
    pub name: &'static str,
    pub policy: SelectionPolicy,
    pub format: OutputFormat,
}

/// Random quote as SVG.
pub async fn random_svg(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let route = CardRoute {
        name: "random_svg",
        policy: SelectionPolicy::Random,
        format: OutputFormat::Svg,
    };
    serve_card(&state, route, &headers).await
}

/// Random quote as PNG.
pub async fn random_png(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let route = CardRoute {
        name: "random_png",
        policy: SelectionPolicy::Random,
        format: OutputFormat::Png,
    };
    serve_card(&state, route, &headers).await
}

/// Quote of the day as SVG.
pub async fn daily_svg(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let route = CardRoute {
        name: "daily_svg",
        policy: state.daily_policy,
        format: OutputFormat::Svg,
    };
    serve_card(&state, route, &headers).await
}

/// Quote of the day as PNG.
pub async fn daily_png(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let route = CardRoute {
        name: "daily_png",
        policy: state.daily_policy,
        format: OutputFormat::Png,
    };
    serve_card(&state, route, &headers).await
}

/// Fetch, select, render, and respond. Never fails: errors become a 500 with
/// an error card in the route's format.
pub async fn serve_card(state: &AppState, route: CardRoute, headers: &HeaderMap) -> Response {
    let start = Instant::now();
    let request_id = request_id(headers);
    let now = Utc::now();

    let card = tokio::time::timeout(state.card_timeout, build_card(state, route, now))
        .await
        .unwrap_or_else(|_| {
            Err(CardError::UpstreamFailure(format!(
                "card not ready within {:?}",
                state.card_timeout
            )))
        });

    let response = match card {
        Ok(card) => {
            tracing::info!(
                request_id = %request_id,
                route = route.name,
                lines = card.line_count,
                bytes = card.bytes.len(),
                "Card rendered"
            );
            let cache = CachePolicy::for_selection(route.policy, now, state.daily_max_age_secs);
            response::image(card, cache)
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                route = route.name,
                kind = e.kind(),
                error = %e,
                "Failed to serve quote card"
            );
            response::fallback(&state.renderer, route.format)
        }
    };

    metrics::record_request(route.name, response.status().as_u16(), start);
    response
}

async fn build_card(
    state: &AppState,
    route: CardRoute,
    now: DateTime<Utc>,
) -> CardResult<RenderedImage> {
    let picked = state.engine.pick(route.policy, now).await?;
    let attribution = picked.attribution();
    let renderer = state.renderer.clone();

    // Rasterizing is CPU bound; keep it off the async workers.
    tokio::task::spawn_blocking(move || {
        renderer.render(&picked.quote.text, &attribution, route.format)
    })
    .await
    .map_err(|e| CardError::ComposeFailure(format!("render task failed: {e}")))?
}

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

/// Liveness probe. Does not touch the upstream API.
pub async fn health() -> impl IntoResponse {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
