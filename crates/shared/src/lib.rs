//! Shared utilities for all services.
//!
//! - logging setup (re-exported from `storefront-observability`)
//! - the health and error response envelopes every service returns

pub mod response;

pub use response::{
    ENVELOPE_VERSION, ErrorResponse, HEALTH_STATUS, HealthResponse, VALIDATION_ERROR_CODE,
    create_error_response, create_health_response,
};
pub use storefront_observability::{
    ConfigError, DEFAULT_LEVEL, LogConfig, LogLevel, Logger, LoggerRegistry, setup_logging,
};
