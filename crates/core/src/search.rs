//! Search parameters and paginated results.
//!
//! A search is described by [`SearchParams`] (page, page size, optional sort and
//! filter) and answered with a [`SearchResult`] (one page of items plus the total
//! number of matches). Both are plain values; the repository decides how to run the
//! filter → sort → paginate pipeline.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PER_PAGE: u64 = 15;

/// Direction of an ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Case-insensitive parse of `"asc"` / `"desc"`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl core::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A filter value that can be "empty" (equivalent to no filter at all).
pub trait SearchFilter: Clone + Send + Sync + 'static {
    fn is_empty(&self) -> bool;
}

impl SearchFilter for String {
    fn is_empty(&self) -> bool {
        str::is_empty(self)
    }
}

/// Raw, unnormalized search request as it arrives from a caller.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchInput<F> {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub sort: Option<String>,
    pub sort_dir: Option<String>,
    pub filter: Option<F>,
}

impl<F> Default for SearchInput<F> {
    fn default() -> Self {
        Self {
            page: None,
            per_page: None,
            sort: None,
            sort_dir: None,
            filter: None,
        }
    }
}

/// Normalized search parameters.
///
/// ## Normalization
///
/// - `page`: absent or non-positive ⇒ 1
/// - `per_page`: absent ⇒ 15; non-positive ⇒ 1
/// - `sort`: blank ⇒ none
/// - `sort_dir`: none without a sort; with a sort, `asc` unless `desc` was asked for
/// - `filter`: an empty filter ⇒ none
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams<F> {
    page: u64,
    per_page: u64,
    sort: Option<String>,
    sort_dir: Option<SortDirection>,
    filter: Option<F>,
}

impl<F: SearchFilter> SearchParams<F> {
    pub fn new(input: SearchInput<F>) -> Self {
        let page = match input.page {
            Some(p) if p > 0 => p as u64,
            _ => DEFAULT_PAGE,
        };
        let per_page = match input.per_page {
            None => DEFAULT_PER_PAGE,
            Some(p) if p > 0 => p as u64,
            Some(_) => 1,
        };
        let sort = input
            .sort
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let sort_dir = sort.as_ref().map(|_| {
            input
                .sort_dir
                .as_deref()
                .and_then(SortDirection::parse)
                .unwrap_or(SortDirection::Asc)
        });
        let filter = input.filter.filter(|f| !f.is_empty());

        Self {
            page,
            per_page,
            sort,
            sort_dir,
            filter,
        }
    }
}

impl<F> SearchParams<F> {
    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    pub fn sort_dir(&self) -> Option<SortDirection> {
        self.sort_dir
    }

    pub fn filter(&self) -> Option<&F> {
        self.filter.as_ref()
    }

    /// Index of the first item of the requested page.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    pub fn limit(&self) -> u64 {
        self.per_page
    }
}

impl<F> Default for SearchParams<F> {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            sort: None,
            sort_dir: None,
            filter: None,
        }
    }
}

/// Serializable pagination metadata of a [`SearchResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub current_page: u64,
    pub per_page: u64,
    pub last_page: u64,
    pub total: u64,
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<E> {
    items: Vec<E>,
    total: u64,
    current_page: u64,
    per_page: u64,
    last_page: u64,
}

impl<E> SearchResult<E> {
    /// `last_page` is derived as `ceil(total / per_page)`.
    pub fn new(items: Vec<E>, total: u64, current_page: u64, per_page: u64) -> Self {
        let last_page = total.div_ceil(per_page.max(1));
        Self {
            items,
            total,
            current_page,
            per_page,
            last_page,
        }
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub fn into_items(self) -> Vec<E> {
        self.items
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    pub fn last_page(&self) -> u64 {
        self.last_page
    }

    pub fn meta(&self) -> PaginationMeta {
        PaginationMeta {
            current_page: self.current_page,
            per_page: self.per_page,
            last_page: self.last_page,
            total: self.total,
        }
    }

    /// Same page, items transformed (e.g. into output DTOs).
    pub fn map_items<U>(self, f: impl FnMut(E) -> U) -> SearchResult<U> {
        SearchResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            current_page: self.current_page,
            per_page: self.per_page,
            last_page: self.last_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn params(input: SearchInput<String>) -> SearchParams<String> {
        SearchParams::new(input)
    }

    #[test]
    fn defaults() {
        let p = params(SearchInput::default());
        assert_eq!(p.page(), 1);
        assert_eq!(p.per_page(), 15);
        assert_eq!(p.sort(), None);
        assert_eq!(p.sort_dir(), None);
        assert_eq!(p.filter(), None);
        assert_eq!(p, SearchParams::default());
    }

    #[test]
    fn page_coerces_to_one() {
        for raw in [0, -1, -100] {
            let p = params(SearchInput {
                page: Some(raw),
                ..Default::default()
            });
            assert_eq!(p.page(), 1);
        }
        let p = params(SearchInput {
            page: Some(3),
            ..Default::default()
        });
        assert_eq!(p.page(), 3);
    }

    #[test]
    fn per_page_coerces_to_one_when_non_positive() {
        for raw in [0, -5] {
            let p = params(SearchInput {
                per_page: Some(raw),
                ..Default::default()
            });
            assert_eq!(p.per_page(), 1);
        }
    }

    #[test]
    fn sort_dir_follows_sort() {
        let p = params(SearchInput {
            sort_dir: Some("desc".into()),
            ..Default::default()
        });
        assert_eq!(p.sort_dir(), None);

        let p = params(SearchInput {
            sort: Some("name".into()),
            ..Default::default()
        });
        assert_eq!(p.sort_dir(), Some(SortDirection::Asc));

        let p = params(SearchInput {
            sort: Some("name".into()),
            sort_dir: Some("DESC".into()),
            ..Default::default()
        });
        assert_eq!(p.sort_dir(), Some(SortDirection::Desc));

        let p = params(SearchInput {
            sort: Some("name".into()),
            sort_dir: Some("sideways".into()),
            ..Default::default()
        });
        assert_eq!(p.sort_dir(), Some(SortDirection::Asc));
    }

    #[test]
    fn blank_sort_and_empty_filter_are_dropped() {
        let p = params(SearchInput {
            sort: Some("  ".into()),
            filter: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(p.sort(), None);
        assert_eq!(p.filter(), None);
    }

    #[test]
    fn last_page_is_ceiling() {
        let r = SearchResult::new(vec![1, 2], 5, 1, 2);
        assert_eq!(r.last_page(), 3);
        assert_eq!(
            r.meta(),
            PaginationMeta {
                current_page: 1,
                per_page: 2,
                last_page: 3,
                total: 5
            }
        );
        assert_eq!(SearchResult::<i32>::new(vec![], 0, 1, 15).last_page(), 0);
    }

    #[test]
    fn meta_serializes_flat() {
        let r = SearchResult::new(vec!["a"], 1, 1, 15);
        let json = serde_json::to_value(r.meta()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"current_page": 1, "per_page": 15, "last_page": 1, "total": 1})
        );
    }

    #[test]
    fn map_items_keeps_paging() {
        let r = SearchResult::new(vec![1, 2], 4, 2, 2).map_items(|i| i * 10);
        assert_eq!(r.items(), &[10, 20]);
        assert_eq!(r.current_page(), 2);
        assert_eq!(r.last_page(), 2);
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 500, ..ProptestConfig::default() })]

        #[test]
        fn last_page_covers_total(total in 0u64..10_000, per_page in 1u64..200) {
            let r = SearchResult::<()>::new(vec![], total, 1, per_page);
            prop_assert!(r.last_page() * per_page >= total);
            if total > 0 {
                prop_assert!((r.last_page() - 1) * per_page < total);
            }
        }

        #[test]
        fn normalized_params_are_positive(page in any::<i64>(), per_page in any::<i64>()) {
            let p = params(SearchInput { page: Some(page), per_page: Some(per_page), ..Default::default() });
            prop_assert!(p.page() >= 1);
            prop_assert!(p.per_page() >= 1);
        }
    }
}
