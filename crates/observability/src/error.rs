//! Logging configuration errors.

use thiserror::Error;

/// Logging could not be configured. Services treat this as fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unrecognized log level {0:?} (expected one of DEBUG, INFO, WARN, ERROR, CRITICAL)")]
    InvalidLevel(String),

    #[error("service name must not be empty")]
    EmptyServiceName,
}
