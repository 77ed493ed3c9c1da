//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and the quote engine produce:
//!     → logging.rs (structured tracing events, request ID fields)
//!     → metrics.rs (counters and histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Prometheus scrape endpoint (optional)
//! ```

pub mod logging;
pub mod metrics;
