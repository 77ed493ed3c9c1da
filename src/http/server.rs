//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the card and health routes
//! - Wire up middleware (request ID, tracing, timeout, response headers)
//! - Build the shared, immutable application state
//! - Serve on a listener until shutdown is requested

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::error::CardResult;
use crate::http::quote;
use crate::http::request::UuidRequestId;
use crate::lifecycle::shutdown;
use crate::quoting::{QuoteEngine, QuoteFetcher, SelectionPolicy};
use crate::render::CardRenderer;

pub const RANDOM_SVG_PATH: &str = "/api/philosopher-quote";
pub const RANDOM_PNG_PATH: &str = "/api/philosopher-quote.png";
pub const DAILY_SVG_PATH: &str = "/api/quote-of-the-day";
pub const DAILY_PNG_PATH: &str = "/api/quote-of-the-day.png";
pub const HEALTH_PATH: &str = "/health";

/// Time kept back from the inbound request timeout so a card that runs out
/// of time can still be answered with the error card.
const FALLBACK_HEADROOM: Duration = Duration::from_millis(500);

/// Application state injected into handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<QuoteEngine>,
    pub renderer: Arc<CardRenderer>,
    pub daily_policy: SelectionPolicy,
    pub daily_max_age_secs: u64,
    /// Budget for fetching and rendering one card.
    pub card_timeout: Duration,
}

/// HTTP server for the quote card service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server, loading fonts for the configured theme.
    pub fn new(config: ServiceConfig) -> CardResult<Self> {
        let renderer = CardRenderer::new(config.theme.clone(), &config.card);
        Self::with_renderer(config, renderer)
    }

    /// Create a new HTTP server around an existing renderer.
    pub fn with_renderer(config: ServiceConfig, renderer: CardRenderer) -> CardResult<Self> {
        let fetcher = QuoteFetcher::new(&config.upstream)?;

        let state = AppState {
            engine: Arc::new(QuoteEngine::new(fetcher)),
            renderer: Arc::new(renderer),
            daily_policy: config.selection.daily_policy,
            daily_max_age_secs: config.cache.daily_max_age_secs,
            card_timeout: Duration::from_secs(config.timeouts.request_secs)
                .saturating_sub(FALLBACK_HEADROOM),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route(RANDOM_SVG_PATH, get(quote::random_svg))
            .route(RANDOM_PNG_PATH, get(quote::random_png))
            .route(DAILY_SVG_PATH, get(quote::daily_svg))
            .route(DAILY_PNG_PATH, get(quote::daily_png))
            .route(HEALTH_PATH, get(quote::health))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
    }

    /// The configured router, for serving or for in-process tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            daily_policy = self.config.selection.daily_policy.as_str(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
