//! Philosopher quote cards over HTTP.
//!
//! Fetches quotes from a philosophy API, picks one (at random or as the
//! quote of the day), and answers with a styled SVG or PNG card.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod quoting;
pub mod render;

pub use config::schema::ServiceConfig;
pub use error::{CardError, CardResult};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
