//! Outbound calls to the philosophy API.

use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::config::UpstreamConfig;
use crate::error::{CardError, CardResult};
use crate::quoting::types::{Philosopher, Quote};

/// HTTP client for the quotes and philosopher endpoints.
///
/// Every call is bounded by the configured timeout. No retries.
#[derive(Debug, Clone)]
pub struct QuoteFetcher {
    client: reqwest::Client,
    quotes_url: Url,
    philosophers_url: Url,
}

impl QuoteFetcher {
    pub fn new(config: &UpstreamConfig) -> CardResult<Self> {
        let quotes_url = Url::parse(&config.quotes_url)
            .map_err(|e| CardError::UpstreamFailure(format!("invalid quotes_url: {e}")))?;
        let philosophers_url = Url::parse(&config.philosophers_url)
            .map_err(|e| CardError::UpstreamFailure(format!("invalid philosophers_url: {e}")))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| CardError::UpstreamFailure(format!("build http client: {e}")))?;

        Ok(Self {
            client,
            quotes_url,
            philosophers_url,
        })
    }

    /// Fetch the full quote collection.
    ///
    /// Anything other than a 2xx JSON array of quotes is an upstream failure.
    /// An empty array is returned as-is; selection rejects it.
    pub async fn fetch_quotes(&self) -> CardResult<Vec<Quote>> {
        let response = self
            .client
            .get(self.quotes_url.clone())
            .send()
            .await
            .map_err(|e| CardError::UpstreamFailure(describe(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CardError::UpstreamFailure(format!(
                "quotes endpoint returned {status}"
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| CardError::UpstreamFailure(format!("quotes body is not JSON: {e}")))?;

        if !body.is_array() {
            return Err(CardError::UpstreamFailure(
                "quotes body is not a JSON array".to_string(),
            ));
        }

        serde_json::from_value(body)
            .map_err(|e| CardError::UpstreamFailure(format!("malformed quote: {e}")))
    }

    /// Fetch one philosopher by id.
    pub async fn fetch_philosopher(&self, id: &str) -> CardResult<Philosopher> {
        let detail_failure = |reason: String| CardError::DetailFetchFailure {
            id: id.to_string(),
            reason,
        };

        let url = self.philosopher_url(id).map_err(detail_failure)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| detail_failure(describe(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(detail_failure(format!("endpoint returned {status}")));
        }

        response
            .json::<Philosopher>()
            .await
            .map_err(|e| detail_failure(format!("malformed body: {e}")))
    }

    /// `{philosophers_url}/{id}`, with `id` percent-encoded as one segment.
    pub fn philosopher_url(&self, id: &str) -> Result<Url, String> {
        let mut url = self.philosophers_url.clone();
        url.path_segments_mut()
            .map_err(|_| format!("cannot append id to {}", self.philosophers_url))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }
}

fn describe(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("timed out: {error}")
    } else if error.is_connect() {
        format!("connection failed: {error}")
    } else {
        error.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher(philosophers_url: &str) -> QuoteFetcher {
        QuoteFetcher::new(&UpstreamConfig {
            philosophers_url: philosophers_url.to_string(),
            ..UpstreamConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_philosopher_url() {
        let f = fetcher("https://api.example.com/philosophers");
        assert_eq!(
            f.philosopher_url("42").unwrap().as_str(),
            "https://api.example.com/philosophers/42"
        );

        let f = fetcher("https://api.example.com/philosophers/");
        assert_eq!(
            f.philosopher_url("42").unwrap().as_str(),
            "https://api.example.com/philosophers/42"
        );
    }

    #[test]
    fn test_philosopher_id_is_encoded() {
        let f = fetcher("https://api.example.com/philosophers");
        let url = f.philosopher_url("plato/republic?x").unwrap();
        assert_eq!(url.path(), "/philosophers/plato%2Frepublic%3Fx");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_invalid_url_rejected() {
        let err = QuoteFetcher::new(&UpstreamConfig {
            quotes_url: "not a url".into(),
            ..UpstreamConfig::default()
        })
        .unwrap_err();
        assert_eq!(err.kind(), "upstream_failure");
    }
}
