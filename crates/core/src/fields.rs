//! Typed field access over an untrusted JSON object.
//!
//! Every accessor returns `Result<T, FieldViolation>` instead of bailing out, so
//! a schema can read all of its fields first and then report every failure in
//! one `ValidationError`:
//!
//! ```ignore
//! let fields = Fields::of(&value)?;
//! match (fields.string("name"), fields.optional_string("phone")) {
//!     (Ok(name), Ok(phone)) => Ok(Contact { name, phone }),
//!     (name, phone) => Err(ValidationError::collect([name.err(), phone.err()])),
//! }
//! ```

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::error::{FieldViolation, ROOT_FIELD, ValidationError, ValidationResult};

/// Naive timestamps (no offset) are read as UTC.
const NAIVE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

const NOT_A_DECIMAL: &str = "not a decimal number";
const DECIMAL_OUT_OF_RANGE: &str = "number out of decimal range";

/// Borrowed view over the keys of a JSON object.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    object: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    /// Fails with a single `__root__` violation when `value` is not an object.
    pub fn of(value: &'a Value) -> ValidationResult<Self> {
        match value {
            Value::Object(object) => Ok(Self { object }),
            other => Err(ValidationError::single(FieldViolation::wrong_type(
                ROOT_FIELD,
                "object",
                json_type(other),
            ))),
        }
    }

    fn required(&self, field: &str) -> Result<&'a Value, FieldViolation> {
        self.object
            .get(field)
            .ok_or_else(|| FieldViolation::missing(field))
    }

    pub fn string(&self, field: &str) -> Result<String, FieldViolation> {
        match self.required(field)? {
            Value::String(s) => Ok(s.clone()),
            other => Err(FieldViolation::wrong_type(field, "string", json_type(other))),
        }
    }

    /// Absent and `null` both read as `None`.
    pub fn optional_string(&self, field: &str) -> Result<Option<String>, FieldViolation> {
        match self.object.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(FieldViolation::wrong_type(field, "string", json_type(other))),
        }
    }

    pub fn integer(&self, field: &str) -> Result<i64, FieldViolation> {
        match self.required(field)? {
            Value::Number(n) => n
                .as_i64()
                .ok_or_else(|| FieldViolation::wrong_type(field, "integer", "number")),
            other => Err(FieldViolation::wrong_type(field, "integer", json_type(other))),
        }
    }

    /// Accepts a decimal string (`"19.99"`) or a JSON number.
    ///
    /// Strings are parsed exactly. Numbers go through their shortest textual
    /// form, which is what the client wrote for any value a float can carry.
    pub fn decimal(&self, field: &str) -> Result<Decimal, FieldViolation> {
        match self.required(field)? {
            Value::String(s) => {
                let text = s.trim();
                parse_decimal(text).ok_or_else(|| decimal_violation(field, text))
            }
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    return Ok(Decimal::from(i));
                }
                if let Some(u) = n.as_u64() {
                    return Ok(Decimal::from(u));
                }
                let text = n.to_string();
                parse_decimal(&text).ok_or_else(|| decimal_violation(field, &text))
            }
            other => Err(FieldViolation::wrong_type(field, "decimal", json_type(other))),
        }
    }

    /// RFC 3339, or a naive `YYYY-MM-DDTHH:MM:SS[.f]` read as UTC.
    pub fn timestamp(&self, field: &str) -> Result<DateTime<Utc>, FieldViolation> {
        match self.required(field)? {
            Value::String(s) => parse_timestamp(s)
                .ok_or_else(|| FieldViolation::invalid(field, "not an ISO-8601 timestamp")),
            other => Err(FieldViolation::wrong_type(field, "timestamp", json_type(other))),
        }
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str_exact(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Well-formed numbers that `Decimal` cannot hold get the same reason whether
/// they arrived as a string or a JSON number.
fn decimal_violation(field: &str, text: &str) -> FieldViolation {
    let numeric = text.parse::<f64>().is_ok()
        && !text
            .trim_start_matches(['+', '-'])
            .starts_with(|c: char| c.is_ascii_alphabetic());
    if numeric {
        FieldViolation::invalid(field, DECIMAL_OUT_OF_RANGE)
    } else {
        FieldViolation::invalid(field, NOT_A_DECIMAL)
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, NAIVE_TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// JSON type name used in violation messages.
pub fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
