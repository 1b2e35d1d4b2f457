//! Observability for rollbook
//!
//! Structured logging through `tracing`. One subscriber is installed at
//! startup; `RUST_LOG` overrides the default filter.
//!
//! # Usage
//!
//! ```ignore
//! use rollbook::observability::{init_logging, LogFormat};
//!
//! init_logging(LogFormat::Json, "info")?;
//! tracing::info!(records = 3, "student log replayed");
//! ```

mod logger;

pub use logger::{init_logging, LogFormat};
