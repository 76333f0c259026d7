//! `storefront-core` — building blocks shared by every service's entity schemas.
//!
//! This crate holds **pure** data primitives (no IO, no logging, no HTTP):
//! identifiers, the `Entity` trait, and the field-level validation model used
//! when a request body is turned into a typed schema.

pub mod entity;
pub mod error;
pub mod fields;
pub mod id;

pub use entity::Entity;
pub use error::{FieldViolation, InvalidId, ValidationError, ValidationResult, ViolationKind};
pub use fields::Fields;
pub use id::EntityId;
