//! # ctty Utilities
//!
//! Shared logging setup for the ctty tools.
//!
//! Library code in `ctty-core` only emits `tracing` events. Binaries call one
//! of the `init_logging*` functions here once at startup to decide where those
//! events go.

pub mod logging;

// Re-export commonly used logging functions for convenience
pub use logging::{init_logging, init_logging_with_level, LogFormat, LogLevel, LoggingError, LoggingGuard};
pub use tracing::{debug, error, info, trace, warn};
