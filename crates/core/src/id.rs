//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::Identifier;
use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

const INVALID_ID_MESSAGE: &str = "ID must be a valid UUID";

/// Random 128-bit identifier, equal by value.
///
/// Only the canonical hyphenated form (`xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`) is
/// accepted when parsing. Serializes as that string.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId(Uuid);

impl EntityId {
    /// Generate a fresh random (v4) identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(s: &str) -> DomainResult<Self> {
        if s.len() != 36 {
            return Err(DomainError::invalid_id(INVALID_ID_MESSAGE));
        }
        let uuid = Uuid::try_parse(s).map_err(|_| DomainError::invalid_id(INVALID_ID_MESSAGE))?;
        Ok(Self(uuid))
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueObject for EntityId {}

impl Identifier for EntityId {
    fn as_entity_id(&self) -> &EntityId {
        self
    }
}

impl core::fmt::Display for EntityId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for EntityId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for EntityId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EntityId> for String {
    fn from(value: EntityId) -> Self {
        value.to_string()
    }
}

impl From<Uuid> for EntityId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// Implements the identifier boilerplate for a `pub struct $t(pub EntityId)` newtype.
#[macro_export]
macro_rules! impl_entity_id {
    ($t:ident) => {
        impl $t {
            /// Generate a fresh identifier.
            pub fn new() -> Self {
                Self($crate::EntityId::new())
            }

            pub fn parse(s: &str) -> $crate::DomainResult<Self> {
                Ok(Self($crate::EntityId::parse(s)?))
            }

            pub fn entity_id(&self) -> $crate::EntityId {
                self.0
            }
        }

        impl Default for $t {
            fn default() -> Self {
                Self::new()
            }
        }

        impl $crate::ValueObject for $t {}

        impl $crate::Identifier for $t {
            fn as_entity_id(&self) -> &$crate::EntityId {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl core::str::FromStr for $t {
            type Err = $crate::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl From<$crate::EntityId> for $t {
            fn from(value: $crate::EntityId) -> Self {
                Self(value)
            }
        }
    };
}
