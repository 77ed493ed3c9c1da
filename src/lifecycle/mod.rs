//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! SIGTERM / Ctrl+C (signals.rs)
//!     → Shutdown::trigger (shutdown.rs)
//!     → HttpServer stops accepting, drains in-flight requests, returns
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
