use serde::Serialize;

use catalog_core::SearchResult;

/// Page of output DTOs returned by the list use cases.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginationOutput<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub current_page: u64,
    pub last_page: u64,
    pub per_page: u64,
}

impl<T> PaginationOutput<T> {
    pub fn from_search_result<E>(result: SearchResult<E>, to_output: impl FnMut(E) -> T) -> Self {
        let meta = result.meta();
        Self {
            items: result.into_items().into_iter().map(to_output).collect(),
            total: meta.total,
            current_page: meta.current_page,
            last_page: meta.last_page,
            per_page: meta.per_page,
        }
    }
}
