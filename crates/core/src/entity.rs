//! Entity trait: identity assigned by the owning service.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// When the owning service first stored the entity.
    fn created_at(&self) -> chrono::DateTime<chrono::Utc>;
}
