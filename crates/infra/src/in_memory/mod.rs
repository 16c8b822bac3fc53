//! In-memory repositories.
//!
//! [`InMemorySearchableRepository`] keeps entities in insertion order behind a
//! `RwLock` and answers searches with a filter → sort → paginate pipeline:
//!
//! ```text
//! stored items (insertion order)
//!   ↓ filter    strategy predicate; skipped when there is no filter
//!   ↓ sort      stable; unknown or absent sort field ⇒ created_at desc
//!   ↓ paginate  [(page - 1) * per_page, page * per_page)
//! SearchResult { items, total = filtered count, ... }
//! ```
//!
//! What differs per aggregate (filter shape and predicate, sortable fields) lives in a
//! [`SearchStrategy`]. Intended for tests/dev; every search clones the collection.

pub mod cast_member;
pub mod category;

use std::collections::HashSet;
use std::marker::PhantomData;
use std::sync::RwLock;

use async_trait::async_trait;

use catalog_core::{
    DomainError, Entity, ExistsById, FieldValue, Repository, RepositoryError, RepositoryResult,
    SearchFilter, SearchParams, SearchResult, SearchableRepository, SortDirection, dedup_ids,
};

pub use cast_member::{CastMemberInMemoryRepository, CastMemberSearch};
pub use category::{CategoryInMemoryRepository, CategorySearch};

/// Field used when a search does not name a sortable field.
pub const DEFAULT_SORT_FIELD: &str = "created_at";

/// Aggregate-specific parts of an in-memory search.
pub trait SearchStrategy<E: Entity>: Send + Sync + 'static {
    type Filter: SearchFilter;

    /// Fields a search may sort by.
    const SORTABLE_FIELDS: &'static [&'static str];

    fn matches(entity: &E, filter: &Self::Filter) -> bool;
}

/// Searchable repository over a `Vec` guarded by a `RwLock`.
#[derive(Debug)]
pub struct InMemorySearchableRepository<E, S> {
    items: RwLock<Vec<E>>,
    _strategy: PhantomData<fn() -> S>,
}

impl<E, S> Default for InMemorySearchableRepository<E, S> {
    fn default() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
            _strategy: PhantomData,
        }
    }
}

impl<E, S> InMemorySearchableRepository<E, S>
where
    E: Entity,
    S: SearchStrategy<E>,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<E>) -> Self {
        Self {
            items: RwLock::new(items),
            _strategy: PhantomData,
        }
    }

    fn snapshot(&self) -> RepositoryResult<Vec<E>> {
        let items = self.items.read().map_err(|_| poisoned())?;
        Ok(items.clone())
    }

    pub fn apply_filter(items: Vec<E>, filter: Option<&S::Filter>) -> Vec<E> {
        match filter {
            None => items,
            Some(filter) => items.into_iter().filter(|e| S::matches(e, filter)).collect(),
        }
    }

    /// Stable sort by `sort` when it is sortable, otherwise by creation time, newest first.
    pub fn apply_sort(items: Vec<E>, sort: Option<&str>, sort_dir: Option<SortDirection>) -> Vec<E> {
        let (field, dir) = match sort {
            Some(field) if S::SORTABLE_FIELDS.contains(&field) => {
                (field, sort_dir.unwrap_or(SortDirection::Asc))
            }
            _ => (DEFAULT_SORT_FIELD, SortDirection::Desc),
        };

        let mut keyed: Vec<(FieldValue, E)> = items.into_iter().map(|e| (e.field(field), e)).collect();
        keyed.sort_by(|(a, _), (b, _)| match dir {
            SortDirection::Asc => a.cmp(b),
            SortDirection::Desc => b.cmp(a),
        });
        keyed.into_iter().map(|(_, e)| e).collect()
    }

    pub fn apply_paginate(items: Vec<E>, page: u64, per_page: u64) -> Vec<E> {
        let offset = page.saturating_sub(1).saturating_mul(per_page);
        items
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(per_page).unwrap_or(usize::MAX))
            .collect()
    }
}

fn poisoned() -> RepositoryError {
    RepositoryError::storage("lock poisoned")
}

#[async_trait]
impl<E, S> Repository<E> for InMemorySearchableRepository<E, S>
where
    E: Entity,
    S: SearchStrategy<E>,
{
    async fn insert(&self, entity: E) -> RepositoryResult<()> {
        let mut items = self.items.write().map_err(|_| poisoned())?;
        items.push(entity);
        Ok(())
    }

    async fn bulk_insert(&self, entities: Vec<E>) -> RepositoryResult<()> {
        let mut items = self.items.write().map_err(|_| poisoned())?;
        items.extend(entities);
        Ok(())
    }

    async fn find_by_id(&self, id: &E::Id) -> RepositoryResult<Option<E>> {
        let items = self.items.read().map_err(|_| poisoned())?;
        Ok(items.iter().find(|e| e.entity_id() == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[E::Id]) -> RepositoryResult<Vec<E>> {
        let wanted: HashSet<&E::Id> = ids.iter().collect();
        let mut seen: HashSet<E::Id> = HashSet::new();
        let items = self.items.read().map_err(|_| poisoned())?;
        Ok(items
            .iter()
            .filter(|e| wanted.contains(e.entity_id()) && seen.insert(*e.entity_id()))
            .cloned()
            .collect())
    }

    async fn exists_by_id(&self, ids: &[E::Id]) -> RepositoryResult<ExistsById<E::Id>> {
        let ids = dedup_ids(ids)?;
        let items = self.items.read().map_err(|_| poisoned())?;
        if items.is_empty() {
            return Ok(ExistsById {
                exists: Vec::new(),
                not_exists: ids,
            });
        }

        let stored: HashSet<&E::Id> = items.iter().map(|e| e.entity_id()).collect();
        let (exists, not_exists) = ids.into_iter().partition(|id| stored.contains(id));
        Ok(ExistsById { exists, not_exists })
    }

    async fn update(&self, entity: E) -> RepositoryResult<()> {
        let mut items = self.items.write().map_err(|_| poisoned())?;
        let slot = items
            .iter_mut()
            .find(|e| e.entity_id() == entity.entity_id())
            .ok_or_else(|| DomainError::not_found(E::NAME, entity.entity_id()))?;
        *slot = entity;
        Ok(())
    }

    async fn delete(&self, id: &E::Id) -> RepositoryResult<()> {
        let mut items = self.items.write().map_err(|_| poisoned())?;
        let index = items
            .iter()
            .position(|e| e.entity_id() == id)
            .ok_or_else(|| DomainError::not_found(E::NAME, id))?;
        items.remove(index);
        Ok(())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<E>> {
        self.snapshot()
    }
}

#[async_trait]
impl<E, S> SearchableRepository<E, S::Filter> for InMemorySearchableRepository<E, S>
where
    E: Entity,
    S: SearchStrategy<E>,
{
    fn sortable_fields(&self) -> &[&'static str] {
        S::SORTABLE_FIELDS
    }

    async fn search(&self, params: &SearchParams<S::Filter>) -> RepositoryResult<SearchResult<E>> {
        let items = self.snapshot()?;
        let filtered = Self::apply_filter(items, params.filter());
        let total = filtered.len() as u64;
        let sorted = Self::apply_sort(filtered, params.sort(), params.sort_dir());
        let page = Self::apply_paginate(sorted, params.page(), params.per_page());
        Ok(SearchResult::new(page, total, params.page(), params.per_page()))
    }
}
