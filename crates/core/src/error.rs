//! Domain error model.

use thiserror::Error;

use crate::notification::NotificationEntry;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (identifiers,
/// validation, lookups). Storage failures are carried by
/// [`RepositoryError`](crate::repository::RepositoryError).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier string was malformed.
    #[error("{0}")]
    InvalidId(String),

    /// An entity with the given identifier(s) does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// A call was made with structurally invalid parameters.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The entity's notification held errors at an application boundary.
    #[error("Entity Validation Error")]
    EntityValidation(Vec<NotificationEntry>),

    /// Search parameters could not be built (e.g. an invalid enumerated filter).
    #[error("Search Validation Error")]
    SearchValidation(Vec<NotificationEntry>),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(entity: &'static str, id: impl core::fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Not-found for a batch of identifiers, listed comma-separated.
    pub fn not_found_many<I, T>(entity: &'static str, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: core::fmt::Display,
    {
        let id = ids
            .into_iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        Self::NotFound { entity, id }
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Flat list of every message carried by a validation error.
    ///
    /// Global messages and field messages are returned in insertion order.
    /// Other variants yield their display string.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::EntityValidation(entries) | Self::SearchValidation(entries) => entries
                .iter()
                .flat_map(NotificationEntry::messages)
                .map(str::to_string)
                .collect(),
            other => vec![other.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::Notification;

    #[test]
    fn not_found_names_entity_and_id() {
        let err = DomainError::not_found("Category", "8d0b0c4e-8d3a-4a4e-9a53-7b4fd7c1e8a1");
        assert_eq!(
            err.to_string(),
            "Category with id 8d0b0c4e-8d3a-4a4e-9a53-7b4fd7c1e8a1 not found"
        );
    }

    #[test]
    fn not_found_many_joins_ids() {
        let err = DomainError::not_found_many("CastMember", ["a", "b"]);
        assert_eq!(err.to_string(), "CastMember with id a,b not found");
    }

    #[test]
    fn messages_flatten_validation_entries() {
        let mut notification = Notification::new();
        notification.set_error("name should not be empty", Some("name"));
        notification.set_error("something global", None);
        notification.set_error("name must be a string", Some("name"));

        let err = DomainError::EntityValidation(notification.to_json());
        assert_eq!(
            err.messages(),
            vec![
                "name should not be empty".to_string(),
                "name must be a string".to_string(),
                "something global".to_string(),
            ]
        );
    }

    #[test]
    fn messages_for_plain_errors_use_display() {
        let err = DomainError::invalid_argument("ids must not be empty");
        assert_eq!(err.messages(), vec!["invalid argument: ids must not be empty".to_string()]);
    }
}
