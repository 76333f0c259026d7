//! Validation error model.

use serde::Serialize;
use thiserror::Error;

/// Result type used when building schemas from untrusted input.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Pseudo-field reported when the input is not a JSON object at all.
pub const ROOT_FIELD: &str = "__root__";

/// What is wrong with a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    /// The field is required but absent.
    Missing,

    /// The field is present but holds the wrong JSON type.
    WrongType {
        expected: &'static str,
        found: &'static str,
    },

    /// The field has the right JSON type but its content cannot be used
    /// (e.g. a malformed timestamp or decimal).
    Invalid { reason: String },
}

impl core::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ViolationKind::Missing => f.write_str("field required"),
            ViolationKind::WrongType { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            ViolationKind::Invalid { reason } => f.write_str(reason),
        }
    }
}

/// A violation attached to one named field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    #[serde(flatten)]
    pub kind: ViolationKind,
}

impl FieldViolation {
    pub fn missing(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: ViolationKind::Missing,
        }
    }

    pub fn wrong_type(field: impl Into<String>, expected: &'static str, found: &'static str) -> Self {
        Self {
            field: field.into(),
            kind: ViolationKind::WrongType { expected, found },
        }
    }

    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: ViolationKind::Invalid {
                reason: reason.into(),
            },
        }
    }
}

impl core::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.field, self.kind)
    }
}

/// Schema construction failed.
///
/// Carries **every** offending field, not just the first one found, so a client
/// can fix a request body in a single round trip.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("validation failed: {}", join_violations(.violations))]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    pub fn single(violation: FieldViolation) -> Self {
        Self::new(vec![violation])
    }

    /// Gather the failures out of a batch of per-field checks.
    pub fn collect<I>(checks: I) -> Self
    where
        I: IntoIterator<Item = Option<FieldViolation>>,
    {
        Self::new(checks.into_iter().flatten().collect())
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Names of the offending fields, in the order they were checked.
    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// An identifier could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid identifier: {0}")]
pub struct InvalidId(pub String);
