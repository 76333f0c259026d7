//! Logging setup shared by every service process.
//!
//! A service calls [`setup_logging`] once at startup and keeps the returned
//! [`Logger`]. Every record is written to standard output as one line:
//!
//! ```text
//! 2026-10-19 18:03:11,123 - customer-service - INFO - listening on :8001
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod level;
pub mod logger;

/// Process-wide `tracing` default (the sink plain `tracing::info!` calls use).
pub mod tracing;

use std::sync::{Once, OnceLock};

pub use config::LogConfig;
pub use error::ConfigError;
pub use level::LogLevel;
pub use logger::{Logger, LoggerRegistry};

/// Level used when a service does not ask for one.
pub const DEFAULT_LEVEL: &str = "INFO";

static REGISTRY: OnceLock<LoggerRegistry> = OnceLock::new();
static GLOBAL_DEFAULT: Once = Once::new();

/// The process-wide registry, writing to standard output.
pub fn global_registry() -> &'static LoggerRegistry {
    REGISTRY.get_or_init(LoggerRegistry::stdout)
}

/// Configure (or fetch) the logger for `service_name`.
///
/// Fails with [`ConfigError`] when `level` is not a recognized level name or the
/// service name is blank. Calling again with the same name returns the logger
/// created by the first call; no second output sink is installed.
///
/// The first logger created here also becomes the global `tracing` default,
/// unless the process already installed one.
pub fn setup_logging(service_name: &str, level: &str) -> Result<Logger, ConfigError> {
    let config = LogConfig::parse(service_name, level)?;
    let logger = global_registry().get_or_init(config);
    GLOBAL_DEFAULT.call_once(|| {
        logger.install_global();
    });
    Ok(logger)
}
