//! # hexbound Utilities
//!
//! Shared utilities, logging, and config helpers for hexbound.
//!
//! Library crates only emit `tracing` events; this crate is where a binary
//! turns them into output.

pub mod logging;

// Re-export commonly used logging functions for convenience
pub use logging::{LogConfig, LogFormat, LogGuard, LogLevel, LoggingError, init_logging, init_logging_with};
pub use tracing::{debug, error, info, trace, warn};
