//! `catalog-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by every catalog aggregate:
//! identifiers, the notification sink and rule-based validator, search parameters and
//! results, and the repository contracts. No storage or transport concerns live here.

pub mod entity;
pub mod error;
pub mod field;
pub mod id;
pub mod notification;
pub mod repository;
pub mod search;
pub mod validator;
pub mod value_object;

pub use entity::{Entity, Identifier, created_now};
pub use error::{DomainError, DomainResult};
pub use field::{FieldSource, FieldValue};
pub use id::EntityId;
pub use notification::{Notification, NotificationEntry};
pub use repository::{
    ExistsById, Repository, RepositoryError, RepositoryResult, SearchableRepository, dedup_ids,
};
pub use search::{
    PaginationMeta, SearchFilter, SearchInput, SearchParams, SearchResult, SortDirection,
};
pub use validator::{EntityValidator, FieldRules, Rule, RuleSet};
pub use value_object::ValueObject;
