//! # folio-observability
//!
//! Structured logging setup for Folio, built on `tracing-subscriber`.

pub mod logging;

pub use logging::{init_logging_with_config, LogFormat, LoggingConfig};
