//! Category repository contract and search types.

use catalog_core::{SearchParams, SearchResult, SearchableRepository};

use crate::category::Category;

/// Case-insensitive substring matched against the category name.
pub type CategoryFilter = String;

pub type CategorySearchParams = SearchParams<CategoryFilter>;

pub type CategorySearchResult = SearchResult<Category>;

/// Fields a category search may be sorted by.
pub const SORTABLE_FIELDS: &[&str] = &["name", "created_at"];

/// Searchable storage of categories.
pub trait CategoryRepository: SearchableRepository<Category, CategoryFilter> {}

impl<R> CategoryRepository for R where R: SearchableRepository<Category, CategoryFilter> + ?Sized {}
