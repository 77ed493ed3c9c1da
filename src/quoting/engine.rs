//! Quote picking: fetch the collection, select one, resolve its author.

use chrono::{DateTime, Utc};

use crate::error::CardResult;
use crate::observability::metrics;
use crate::quoting::fetcher::QuoteFetcher;
use crate::quoting::selector::{select_index, SelectionPolicy};
use crate::quoting::types::{Quote, UNKNOWN_PHILOSOPHER};
use crate::render::Attribution;

/// A selected quote with its resolved author.
#[derive(Debug, Clone, PartialEq)]
pub struct PickedQuote {
    pub quote: Quote,
    pub author: String,
    /// Position of the quote in the fetched collection.
    pub index: usize,
}

impl PickedQuote {
    pub fn attribution(&self) -> Attribution {
        Attribution {
            author: self.author.clone(),
            work: self.quote.work.clone(),
            year: self.quote.year.clone(),
        }
    }
}

/// Engine for picking quotes. Stateless apart from the HTTP client.
#[derive(Debug, Clone)]
pub struct QuoteEngine {
    fetcher: QuoteFetcher,
}

impl QuoteEngine {
    pub fn new(fetcher: QuoteFetcher) -> Self {
        Self { fetcher }
    }

    /// Fetch quotes and pick one according to `policy` at time `now`.
    ///
    /// Fails on an unusable collection. A failed philosopher lookup is logged
    /// and replaced with a placeholder name.
    pub async fn pick(&self, policy: SelectionPolicy, now: DateTime<Utc>) -> CardResult<PickedQuote> {
        let mut quotes = self.fetcher.fetch_quotes().await.inspect_err(|e| {
            metrics::record_upstream_failure(e.kind());
        })?;

        let index = select_index(policy, quotes.len(), now.date_naive(), &mut rand::thread_rng())
            .inspect_err(|e| metrics::record_upstream_failure(e.kind()))?;
        let quote = quotes.swap_remove(index);

        tracing::debug!(
            policy = policy.as_str(),
            index,
            philosopher_id = quote.philosopher_id().unwrap_or("-"),
            "Quote selected"
        );

        let author = self.resolve_author(&quote).await;
        Ok(PickedQuote {
            quote,
            author,
            index,
        })
    }

    async fn resolve_author(&self, quote: &Quote) -> String {
        let Some(id) = quote.philosopher_id() else {
            return UNKNOWN_PHILOSOPHER.to_string();
        };

        match self.fetcher.fetch_philosopher(id).await {
            Ok(philosopher) if !philosopher.name.trim().is_empty() => philosopher.name,
            Ok(_) => {
                tracing::warn!(philosopher_id = %id, "Philosopher has an empty name");
                UNKNOWN_PHILOSOPHER.to_string()
            }
            Err(e) => {
                tracing::warn!(philosopher_id = %id, error = %e, "Philosopher lookup failed, using placeholder");
                metrics::record_upstream_failure(e.kind());
                UNKNOWN_PHILOSOPHER.to_string()
            }
        }
    }
}
