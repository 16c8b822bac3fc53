//! Entity trait: identity + continuity across state changes.

use chrono::{DateTime, DurationRound, TimeDelta, Utc};

use crate::field::FieldSource;
use crate::id::EntityId;
use crate::notification::Notification;
use crate::value_object::ValueObject;

/// Identifier of an entity type (a newtype over [`EntityId`]).
///
/// Implemented by [`impl_entity_id!`](crate::impl_entity_id).
pub trait Identifier:
    ValueObject + Copy + Eq + core::hash::Hash + core::fmt::Display + Send + Sync + 'static
{
    fn as_entity_id(&self) -> &EntityId;
}

/// Current time at microsecond precision, the resolution Postgres `TIMESTAMPTZ` keeps.
pub fn created_now() -> DateTime<Utc> {
    let now = Utc::now();
    now.duration_trunc(TimeDelta::microseconds(1)).unwrap_or(now)
}

/// Entity marker + minimal interface.
///
/// Two entities are the same logical entity iff their identifiers are equal, whatever
/// their other attributes. Each entity owns a [`Notification`] that its validators
/// write into.
pub trait Entity: FieldSource + Clone + Send + Sync + 'static {
    /// Strongly-typed entity identifier.
    type Id: Identifier;

    /// Type name used in not-found messages (e.g. `"Category"`).
    const NAME: &'static str;

    /// Returns the entity identifier.
    fn entity_id(&self) -> &Self::Id;

    fn created_at(&self) -> DateTime<Utc>;

    fn notification(&self) -> &Notification;

    fn notification_mut(&mut self) -> &mut Notification;

    /// Flat attribute mapping for transport; the identifier is its plain string.
    fn to_json(&self) -> serde_json::Value;

    fn same_identity_as(&self, other: &Self) -> bool {
        self.entity_id() == other.entity_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_now_has_whole_microseconds() {
        for _ in 0..20 {
            assert_eq!(created_now().timestamp_subsec_nanos() % 1_000, 0);
        }
    }
}
