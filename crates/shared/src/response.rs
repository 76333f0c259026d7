//! Standard response envelopes.
//!
//! Every service answers health checks and reports failures with the same JSON
//! shapes, so dashboards and clients can treat them uniformly:
//!
//! ```text
//! {"status": "healthy", "service": "<name>", "timestamp": "<iso8601>", "version": "1.0.0", ...extra}
//! {"error": true, "message": "<text>", "timestamp": "<iso8601>"[, "error_code": "<code>"]}
//! ```
//!
//! Building an envelope never fails: these run on the same path that is
//! already reporting a failure.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use storefront_core::ValidationError;

pub const HEALTH_STATUS: &str = "healthy";
pub const ENVELOPE_VERSION: &str = "1.0.0";
/// `error_code` attached to envelopes built from a [`ValidationError`].
pub const VALIDATION_ERROR_CODE: &str = "validation_error";

/// UTC, microsecond precision, `Z` suffix.
fn iso_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn serialize_timestamp<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&iso_timestamp(ts))
}

/// Health-check payload.
///
/// Extra fields are written after the reserved keys (`status`, `service`,
/// `timestamp`, `version`) and replace them on a name clash.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthResponse {
    service: String,
    timestamp: DateTime<Utc>,
    additional: Map<String, Value>,
}

impl HealthResponse {
    pub fn new(service: impl Into<String>) -> Self {
        Self::at(service, Utc::now())
    }

    pub fn at(service: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            service: service.into(),
            timestamp,
            additional: Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.additional.insert(key.into(), value.into());
        self
    }

    /// Later entries win, both within `info` and against earlier extras.
    pub fn merge(mut self, info: Map<String, Value>) -> Self {
        self.additional.extend(info);
        self
    }

    pub fn into_map(self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("status".into(), HEALTH_STATUS.into());
        map.insert("service".into(), self.service.into());
        map.insert("timestamp".into(), iso_timestamp(&self.timestamp).into());
        map.insert("version".into(), ENVELOPE_VERSION.into());
        for (key, value) in self.additional {
            map.insert(key, value);
        }
        map
    }
}

impl Serialize for HealthResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.clone().into_map().serialize(serializer)
    }
}

/// Error payload. `error_code` is left out of the JSON entirely when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    error: bool,
    message: String,
    #[serde(serialize_with = "serialize_timestamp")]
    timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_code: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self::at(message, Utc::now())
    }

    pub fn at(message: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            error: true,
            message: message.into(),
            timestamp,
            error_code: None,
        }
    }

    /// An empty code counts as no code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        let code = code.into();
        self.error_code = (!code.is_empty()).then_some(code);
        self
    }

    /// Envelope for a rejected request body, listing every offending field.
    pub fn from_validation(err: &ValidationError) -> Self {
        Self::new(err.to_string()).with_code(VALIDATION_ERROR_CODE)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn error_code(&self) -> Option<&str> {
        self.error_code.as_deref()
    }

    pub fn into_map(self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("error".into(), Value::Bool(self.error));
        map.insert("message".into(), self.message.into());
        map.insert("timestamp".into(), iso_timestamp(&self.timestamp).into());
        if let Some(code) = self.error_code {
            map.insert("error_code".into(), code.into());
        }
        map
    }
}

impl From<&ValidationError> for ErrorResponse {
    fn from(err: &ValidationError) -> Self {
        Self::from_validation(err)
    }
}

/// Standard "service is alive" payload, with `additional_info` merged over it.
pub fn create_health_response(
    service_name: &str,
    additional_info: Option<Map<String, Value>>,
) -> Map<String, Value> {
    HealthResponse::new(service_name)
        .merge(additional_info.unwrap_or_default())
        .into_map()
}

/// Standard error payload; `error_code` is added only when supplied and non-empty.
pub fn create_error_response(message: &str, error_code: Option<&str>) -> Map<String, Value> {
    let response = match error_code {
        Some(code) => ErrorResponse::new(message).with_code(code),
        None => ErrorResponse::new(message),
    };
    response.into_map()
}
