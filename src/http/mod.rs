//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (assign/propagate x-request-id)
//!     → quote.rs (fetch → select → render)
//!     → response.rs (content type, cache headers, error card)
//!     → Send to client
//! ```

pub mod quote;
pub mod request;
pub mod response;
pub mod server;

pub use request::{request_id, UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
