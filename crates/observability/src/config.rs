//! Logger configuration.

use crate::error::ConfigError;
use crate::level::LogLevel;

/// Per-service logging configuration. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    service_name: String,
    level: LogLevel,
}

impl LogConfig {
    pub fn new(service_name: impl Into<String>, level: LogLevel) -> Result<Self, ConfigError> {
        let service_name = service_name.into();
        if service_name.trim().is_empty() {
            return Err(ConfigError::EmptyServiceName);
        }
        Ok(Self {
            service_name,
            level,
        })
    }

    /// Config at the default level (`INFO`).
    pub fn for_service(service_name: impl Into<String>) -> Result<Self, ConfigError> {
        Self::new(service_name, LogLevel::default())
    }

    /// Build from a level name such as `"INFO"` or `"warning"`.
    pub fn parse(service_name: impl Into<String>, level: &str) -> Result<Self, ConfigError> {
        let level = level.parse()?;
        Self::new(service_name, level)
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }
}
