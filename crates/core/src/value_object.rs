//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**: two value objects with the same values are equal.
//! Identifiers ([`EntityId`](crate::EntityId) and its per-entity newtypes) and small
//! enumerations such as a cast member's type are value objects.

/// Marker trait for value objects.
///
/// - **Value Object**: no identity (two value objects with same values are equal)
/// - **Entity**: has identity (two entities with the same id are the same entity)
///
/// Value objects are immutable; "changing" one means building a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct CastMemberType(u8);
///
/// impl ValueObject for CastMemberType {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
