//! Response construction for card routes.
//!
//! Success and failure both answer with an image of the requested format, so
//! an `<img>` tag pointing at the route never shows a broken image. Only if
//! even the error card cannot be produced does the body fall back to text.

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};

use crate::quoting::selector::{seconds_until_midnight, SelectionPolicy};
use crate::render::{CardRenderer, OutputFormat, RenderedImage};

/// Cache-Control for a card response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    NoStore,
    Public { max_age: u64 },
}

impl CachePolicy {
    /// Random cards are never cached. Daily cards may be cached for at most
    /// `max_age` seconds, and never past the next UTC midnight.
    pub fn for_selection(policy: SelectionPolicy, now: DateTime<Utc>, max_age: u64) -> Self {
        if !policy.is_daily() || max_age == 0 {
            return CachePolicy::NoStore;
        }
        CachePolicy::Public {
            max_age: max_age.min(seconds_until_midnight(now)),
        }
    }

    pub fn header_value(&self) -> HeaderValue {
        match self {
            CachePolicy::NoStore => HeaderValue::from_static("no-store, max-age=0"),
            CachePolicy::Public { max_age } => {
                HeaderValue::from_str(&format!("public, max-age={max_age}"))
                    .unwrap_or_else(|_| HeaderValue::from_static("no-store, max-age=0"))
            }
        }
    }
}

/// 200 response carrying a rendered card.
pub fn image(image: RenderedImage, cache: CachePolicy) -> Response {
    image_with_status(StatusCode::OK, image, cache)
}

/// 500 response carrying the error card for `format`.
pub fn fallback(renderer: &CardRenderer, format: OutputFormat) -> Response {
    match renderer.render_fallback(format) {
        Ok(card) => image_with_status(StatusCode::INTERNAL_SERVER_ERROR, card, CachePolicy::NoStore),
        Err(e) => {
            tracing::error!(error = %e, format = format.as_str(), "Failed to render error card");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CACHE_CONTROL, CachePolicy::NoStore.header_value())],
                "Failed to generate quote image",
            )
                .into_response()
        }
    }
}

fn image_with_status(status: StatusCode, image: RenderedImage, cache: CachePolicy) -> Response {
    let mut response = Response::new(Body::from(image.bytes));
    *response.status_mut() = status;

    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(image.format.content_type()),
    );
    headers.insert(header::CACHE_CONTROL, cache.header_value());
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_random_is_never_cached() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(
            CachePolicy::for_selection(SelectionPolicy::Random, now, 300),
            CachePolicy::NoStore
        );
    }

    #[test]
    fn test_daily_cache_capped_at_midnight() {
        let noon = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(
            CachePolicy::for_selection(SelectionPolicy::DayOfYear, noon, 300),
            CachePolicy::Public { max_age: 300 }
        );

        let late = Utc.with_ymd_and_hms(2024, 1, 1, 23, 58, 30).unwrap();
        assert_eq!(
            CachePolicy::for_selection(SelectionPolicy::DateDigest, late, 300),
            CachePolicy::Public { max_age: 90 }
        );
    }

    #[test]
    fn test_zero_max_age_disables_caching() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(
            CachePolicy::for_selection(SelectionPolicy::DayOfYear, now, 0),
            CachePolicy::NoStore
        );
    }

    #[test]
    fn test_image_response_headers() {
        let response = image(
            RenderedImage {
                format: OutputFormat::Svg,
                bytes: b"<svg/>".to_vec(),
                line_count: 0,
            },
            CachePolicy::Public { max_age: 60 },
        );
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/svg+xml");
        assert_eq!(response.headers()[header::CACHE_CONTROL], "public, max-age=60");
    }
}
