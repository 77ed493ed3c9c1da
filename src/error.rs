//! Error taxonomy for the quote card pipeline.

use thiserror::Error;

/// Errors that can occur while producing a quote card.
#[derive(Debug, Error)]
pub enum CardError {
    /// The upstream returned a well-formed but empty quote collection.
    #[error("no quotes available to select from")]
    EmptyCollection,

    /// The primary quotes fetch failed (network, status, or body shape).
    #[error("upstream quotes request failed: {0}")]
    UpstreamFailure(String),

    /// The philosopher lookup failed. Recovered locally by the caller.
    #[error("philosopher lookup for '{id}' failed: {reason}")]
    DetailFetchFailure { id: String, reason: String },

    /// Rendering the card image failed.
    #[error("failed to compose card image: {0}")]
    ComposeFailure(String),
}

impl CardError {
    /// Short, stable label used for log fields and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            CardError::EmptyCollection => "empty_collection",
            CardError::UpstreamFailure(_) => "upstream_failure",
            CardError::DetailFetchFailure { .. } => "detail_fetch_failure",
            CardError::ComposeFailure(_) => "compose_failure",
        }
    }

    /// Whether the error must abort the request.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, CardError::DetailFetchFailure { .. })
    }
}

/// Result type for card operations.
pub type CardResult<T> = Result<T, CardError>;
