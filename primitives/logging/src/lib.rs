#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Logging utilities shared by the Jito client crates.
//!
//! Library crates only emit `tracing` events. Binaries call [`init`] once to
//! install a formatting subscriber.

use tracing_subscriber::EnvFilter;

/// Errors raised while installing the global subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The level string is not a valid filter directive.
    #[error("invalid log level '{level}': {reason}")]
    InvalidLevel {
        /// Level as supplied by the caller.
        level: String,
        /// Parser message.
        reason: String,
    },
    /// A global subscriber is already installed.
    #[error("a global tracing subscriber is already installed")]
    AlreadyInitialized,
}

/// Builds the filter used by [`init`].
///
/// `RUST_LOG` wins when set; otherwise `level` is used as the directive.
pub fn filter(level: &str) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level)
        .map_err(|e| LoggingError::InvalidLevel { level: level.to_string(), reason: e.to_string() })
}

/// Installs a stderr fmt subscriber filtered at `level`.
pub fn init(level: &str) -> Result<(), LoggingError> {
    let filter = filter(level)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)
}

/// Emits a TRACE event tagged with a module prefix.
pub fn trace(module: &str, msg: &str) {
    tracing::trace!(module, "{}", msg);
}
