//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::quoting::SelectionPolicy;
use crate::render::Theme;

/// Root configuration for the quote card service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Philosophy API endpoints.
    pub upstream: UpstreamConfig,

    /// Quote-of-the-day selection.
    pub selection: SelectionConfig,

    /// Cache headers for daily cards.
    pub cache: CacheConfig,

    /// Card wrapping and fonts.
    pub card: CardConfig,

    /// Card colors.
    pub theme: Theme,

    /// Inbound timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream philosophy API.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Endpoint returning the JSON array of quotes.
    pub quotes_url: String,

    /// Base URL for philosopher detail; the id is appended as a path segment.
    pub philosophers_url: String,

    /// Timeout for each outbound request in seconds.
    pub timeout_secs: u64,

    /// User-Agent sent upstream.
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            quotes_url: "https://philosophersapi.com/api/quotes".to_string(),
            philosophers_url: "https://philosophersapi.com/api/philosophers".to_string(),
            timeout_secs: 5,
            user_agent: concat!("quote-card/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Selection policy for the quote-of-the-day routes.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// `day_of_year` or `date_digest`. `random` is rejected by validation.
    pub daily_policy: SelectionPolicy,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            daily_policy: SelectionPolicy::DayOfYear,
        }
    }
}

/// Cache headers for the quote-of-the-day routes. Random routes are never
/// cacheable.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Upper bound on `max-age`; also capped at the time left in the UTC day.
    pub daily_max_age_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            daily_max_age_secs: 300,
        }
    }
}

/// Card wrapping and font settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CardConfig {
    /// Maximum characters per line on SVG cards.
    pub vector_max_chars: usize,

    /// Cards with more lines than this use the smaller font.
    pub shrink_after_lines: usize,

    /// Extra directory of .ttf/.otf/.ttc files for PNG cards.
    pub fonts_dir: Option<String>,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            vector_max_chars: 45,
            shrink_after_lines: 5,
            fonts_dir: None,
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 15 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
