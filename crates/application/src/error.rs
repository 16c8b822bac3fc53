use thiserror::Error;

use catalog_core::{DomainError, RepositoryError};

/// Application-level error.
///
/// - **Domain**: deterministic failures the caller can act on (invalid id, not found,
///   validation, bad arguments)
/// - **Storage**: the repository backend failed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("storage failure: {0}")]
    Storage(String),
}

impl From<RepositoryError> for ApplicationError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::Domain(err) => ApplicationError::Domain(err),
            RepositoryError::Storage(msg) => ApplicationError::Storage(msg),
        }
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;
