use serde::{Deserialize, Serialize};
use thiserror::Error;

use catalog_core::{DomainError, NotificationEntry, ValueObject};

/// Role of a cast member. Stored and transported as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum CastMemberType {
    Director = 1,
    Actor = 2,
}

/// Raised by [`CastMemberType::create`] for a code outside the enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid cast member type: {0}")]
pub struct InvalidCastMemberTypeError(pub String);

impl InvalidCastMemberTypeError {
    pub fn new(value: impl core::fmt::Display) -> Self {
        Self(value.to_string())
    }

    /// This error as a search validation failure keyed by `type`.
    pub fn into_search_error(self) -> DomainError {
        DomainError::SearchValidation(vec![NotificationEntry::field("type", vec![self.to_string()])])
    }
}

impl CastMemberType {
    /// Every valid code, in ascending order.
    pub const CODES: [i64; 2] = [1, 2];

    pub fn create(value: i64) -> Result<Self, InvalidCastMemberTypeError> {
        match value {
            1 => Ok(Self::Director),
            2 => Ok(Self::Actor),
            other => Err(InvalidCastMemberTypeError::new(other)),
        }
    }

    pub fn value(self) -> i64 {
        self as i64
    }
}

impl ValueObject for CastMemberType {}

impl TryFrom<i64> for CastMemberType {
    type Error = InvalidCastMemberTypeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::create(value)
    }
}

impl From<CastMemberType> for i64 {
    fn from(value: CastMemberType) -> Self {
        value.value()
    }
}

impl core::str::FromStr for CastMemberType {
    type Err = InvalidCastMemberTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map_err(|_| InvalidCastMemberTypeError::new(s))
            .and_then(Self::create)
    }
}
