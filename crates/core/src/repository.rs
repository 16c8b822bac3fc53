//! Repository contracts.
//!
//! A [`Repository`] stores one entity type and addresses it by identifier. A
//! [`SearchableRepository`] additionally answers [`SearchParams`] with a
//! [`SearchResult`]. Both are implemented in memory (tests, development) and against
//! Postgres; callers pick one by construction.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::entity::{Entity, Identifier};
use crate::error::DomainError;
use crate::search::{SearchParams, SearchResult};

/// Repository operation error.
///
/// - **Domain**: not-found, argument errors, or stored state that fails validation
/// - **Storage**: the backing store itself failed (connection, query, lock)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("storage error: {0}")]
    Storage(String),
}

impl RepositoryError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Partition of requested ids into stored and missing ones, in request order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExistsById<Id> {
    pub exists: Vec<Id>,
    pub not_exists: Vec<Id>,
}

impl<Id> Default for ExistsById<Id> {
    fn default() -> Self {
        Self {
            exists: Vec::new(),
            not_exists: Vec::new(),
        }
    }
}

/// Identity-addressed storage for one entity type.
///
/// ## Semantics
///
/// - `insert` / `bulk_insert` do not check uniqueness
/// - `find_by_id` returns `None` when absent; it never fails for a missing id
/// - `find_by_ids` returns each matching stored entity once
/// - `exists_by_id` fails with an argument error on an empty id list
/// - `update` / `delete` fail with a not-found error naming the entity type and id
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    async fn insert(&self, entity: E) -> RepositoryResult<()>;

    async fn bulk_insert(&self, entities: Vec<E>) -> RepositoryResult<()>;

    async fn find_by_id(&self, id: &E::Id) -> RepositoryResult<Option<E>>;

    async fn find_by_ids(&self, ids: &[E::Id]) -> RepositoryResult<Vec<E>>;

    async fn exists_by_id(&self, ids: &[E::Id]) -> RepositoryResult<ExistsById<E::Id>>;

    async fn update(&self, entity: E) -> RepositoryResult<()>;

    async fn delete(&self, id: &E::Id) -> RepositoryResult<()>;

    async fn find_all(&self) -> RepositoryResult<Vec<E>>;
}

/// Repository that also supports filter → sort → paginate queries.
#[async_trait]
pub trait SearchableRepository<E: Entity, F: Send + Sync>: Repository<E> {
    /// Fields a caller may sort by; anything else falls back to the default ordering.
    fn sortable_fields(&self) -> &[&'static str];

    async fn search(&self, params: &SearchParams<F>) -> RepositoryResult<SearchResult<E>>;
}

/// Validates an `exists_by_id` request and removes duplicate ids, keeping request order.
pub fn dedup_ids<Id: Identifier>(ids: &[Id]) -> RepositoryResult<Vec<Id>> {
    if ids.is_empty() {
        return Err(
            DomainError::invalid_argument("ids must be an array with at least one element").into(),
        );
    }
    let mut unique: Vec<Id> = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(id) {
            unique.push(*id);
        }
    }
    Ok(unique)
}

#[async_trait]
impl<E, R> Repository<E> for Arc<R>
where
    E: Entity,
    R: Repository<E> + ?Sized,
{
    async fn insert(&self, entity: E) -> RepositoryResult<()> {
        (**self).insert(entity).await
    }

    async fn bulk_insert(&self, entities: Vec<E>) -> RepositoryResult<()> {
        (**self).bulk_insert(entities).await
    }

    async fn find_by_id(&self, id: &E::Id) -> RepositoryResult<Option<E>> {
        (**self).find_by_id(id).await
    }

    async fn find_by_ids(&self, ids: &[E::Id]) -> RepositoryResult<Vec<E>> {
        (**self).find_by_ids(ids).await
    }

    async fn exists_by_id(&self, ids: &[E::Id]) -> RepositoryResult<ExistsById<E::Id>> {
        (**self).exists_by_id(ids).await
    }

    async fn update(&self, entity: E) -> RepositoryResult<()> {
        (**self).update(entity).await
    }

    async fn delete(&self, id: &E::Id) -> RepositoryResult<()> {
        (**self).delete(id).await
    }

    async fn find_all(&self) -> RepositoryResult<Vec<E>> {
        (**self).find_all().await
    }
}

#[async_trait]
impl<E, F, R> SearchableRepository<E, F> for Arc<R>
where
    E: Entity,
    F: Send + Sync + 'static,
    R: SearchableRepository<E, F> + ?Sized,
{
    fn sortable_fields(&self) -> &[&'static str] {
        (**self).sortable_fields()
    }

    async fn search(&self, params: &SearchParams<F>) -> RepositoryResult<SearchResult<E>> {
        (**self).search(params).await
    }
}
