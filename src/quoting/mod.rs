//! Quote sourcing subsystem.
//!
//! # Data Flow
//! ```text
//! GET quotes_url            (fetcher.rs, fatal on failure)
//!     → select_index        (selector.rs: random | day_of_year | date_digest)
//!     → GET philosophers/id (fetcher.rs, non-fatal: placeholder name)
//!     → PickedQuote         (engine.rs)
//! ```

pub mod engine;
pub mod fetcher;
pub mod selector;
pub mod types;

pub use engine::{PickedQuote, QuoteEngine};
pub use fetcher::QuoteFetcher;
pub use selector::SelectionPolicy;
pub use types::{Philosopher, Quote, UNKNOWN_PHILOSOPHER};
