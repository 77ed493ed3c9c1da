//! Configuration validation.
//!
//! Serde handles syntax; this checks values. Every problem is reported, not
//! just the first.

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ServiceConfig;
use crate::quoting::SelectionPolicy;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    check_http_url(&mut errors, "upstream.quotes_url", &config.upstream.quotes_url);
    check_http_url(
        &mut errors,
        "upstream.philosophers_url",
        &config.upstream.philosophers_url,
    );

    if config.upstream.timeout_secs == 0 {
        errors.push(ValidationError::new("upstream.timeout_secs", "must be > 0"));
    }
    // Two sequential upstream calls must fit inside one inbound request.
    let upstream_budget = config.upstream.timeout_secs.saturating_mul(2);
    if config.timeouts.request_secs <= upstream_budget {
        errors.push(ValidationError::new(
            "timeouts.request_secs",
            format!("must be > {upstream_budget} (twice upstream.timeout_secs)"),
        ));
    }

    if config.selection.daily_policy == SelectionPolicy::Random {
        errors.push(ValidationError::new(
            "selection.daily_policy",
            "must be date based (day_of_year or date_digest)",
        ));
    }

    if config.card.vector_max_chars == 0 {
        errors.push(ValidationError::new("card.vector_max_chars", "must be > 0"));
    }

    for (role, color) in config.theme.colors() {
        if color.trim().is_empty() {
            errors.push(ValidationError::new("theme", format!("color '{role}' is empty")));
        }
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!(
                "'{}' is not a socket address",
                config.observability.metrics_address
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_http_url(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            field,
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(field, e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&ServiceConfig::default()), Ok(()));
    }

    #[test]
    fn test_all_errors_reported() {
        let mut config = ServiceConfig::default();
        config.listener.bind_address = "nowhere".into();
        config.upstream.quotes_url = "ftp://example.com/quotes".into();
        config.upstream.timeout_secs = 0;
        config.selection.daily_policy = SelectionPolicy::Random;
        config.theme.year = " ".into();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "listener.bind_address",
                "upstream.quotes_url",
                "upstream.timeout_secs",
                "selection.daily_policy",
                "theme",
            ]
        );
        assert!(errors[1].to_string().contains("ftp"));
    }

    #[test]
    fn test_request_timeout_must_cover_upstream_calls() {
        let mut config = ServiceConfig::default();
        config.upstream.timeout_secs = 5;

        for request_secs in [0, 1, 10] {
            config.timeouts.request_secs = request_secs;
            let errors = validate_config(&config).unwrap_err();
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, "timeouts.request_secs");
        }

        config.timeouts.request_secs = 11;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = ServiceConfig::default();
        config.observability.metrics_address = "bad".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
