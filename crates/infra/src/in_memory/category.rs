use catalog_category::{Category, CategoryFilter, SORTABLE_FIELDS};

use super::{InMemorySearchableRepository, SearchStrategy};

/// Category search: case-insensitive substring of the name.
#[derive(Debug)]
pub struct CategorySearch;

impl SearchStrategy<Category> for CategorySearch {
    type Filter = CategoryFilter;

    const SORTABLE_FIELDS: &'static [&'static str] = SORTABLE_FIELDS;

    fn matches(entity: &Category, filter: &CategoryFilter) -> bool {
        entity.name().to_lowercase().contains(&filter.to_lowercase())
    }
}

pub type CategoryInMemoryRepository = InMemorySearchableRepository<Category, CategorySearch>;
