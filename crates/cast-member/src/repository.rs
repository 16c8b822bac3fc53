//! Cast member repository contract and search types.

use serde::{Deserialize, Serialize};

use catalog_core::{
    DomainResult, SearchFilter, SearchInput, SearchParams, SearchResult, SearchableRepository,
};

use crate::cast_member::CastMember;
use crate::cast_member_type::CastMemberType;

/// Structured cast member filter. When both parts are set, both must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMemberFilter {
    /// Case-insensitive substring of the name.
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub member_type: Option<CastMemberType>,
}

impl SearchFilter for CastMemberFilter {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.member_type.is_none()
    }
}

/// Unchecked filter as supplied by a caller; `type` is a raw code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMemberFilterInput {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub member_type: Option<i64>,
}

pub type CastMemberSearchParams = SearchParams<CastMemberFilter>;

pub type CastMemberSearchResult = SearchResult<CastMember>;

pub const SORTABLE_FIELDS: &[&str] = &["name", "created_at"];

/// Normalize a raw search request into [`CastMemberSearchParams`].
///
/// A type code of `0` means "no type filter"; any other code outside the enumeration
/// fails with a search validation error keyed by `type`. An empty name is dropped.
pub fn build_search_params(
    input: SearchInput<CastMemberFilterInput>,
) -> DomainResult<CastMemberSearchParams> {
    let filter = match input.filter {
        None => None,
        Some(raw) => {
            let member_type = match raw.member_type {
                None | Some(0) => None,
                Some(code) => Some(
                    CastMemberType::create(code).map_err(|e| e.into_search_error())?,
                ),
            };
            let name = raw.name.filter(|n| !n.is_empty());
            Some(CastMemberFilter { name, member_type })
        }
    };

    Ok(SearchParams::new(SearchInput {
        page: input.page,
        per_page: input.per_page,
        sort: input.sort,
        sort_dir: input.sort_dir,
        filter,
    }))
}

/// Searchable storage of cast members.
pub trait CastMemberRepository: SearchableRepository<CastMember, CastMemberFilter> {}

impl<R> CastMemberRepository for R where
    R: SearchableRepository<CastMember, CastMemberFilter> + ?Sized
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::DomainError;

    fn input(name: Option<&str>, member_type: Option<i64>) -> SearchInput<CastMemberFilterInput> {
        SearchInput {
            filter: Some(CastMemberFilterInput {
                name: name.map(str::to_string),
                member_type,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn invalid_type_is_a_search_validation_error() {
        let err = build_search_params(input(None, Some(3))).unwrap_err();
        match &err {
            DomainError::SearchValidation(_) => {}
            other => panic!("expected search validation error, got {other:?}"),
        }
        assert_eq!(err.messages(), vec!["Invalid cast member type: 3".to_string()]);
    }

    #[test]
    fn zero_type_and_empty_name_mean_no_filter() {
        let params = build_search_params(input(Some(""), Some(0))).unwrap();
        assert_eq!(params.filter(), None);
    }

    #[test]
    fn keeps_valid_parts() {
        let params = build_search_params(input(Some("john"), Some(1))).unwrap();
        assert_eq!(
            params.filter(),
            Some(&CastMemberFilter {
                name: Some("john".to_string()),
                member_type: Some(CastMemberType::Director),
            })
        );

        let params = build_search_params(input(None, Some(2))).unwrap();
        assert_eq!(params.filter().unwrap().member_type, Some(CastMemberType::Actor));
        assert_eq!(params.filter().unwrap().name, None);
    }

    #[test]
    fn paging_is_normalized_too() {
        let params = build_search_params(SearchInput {
            page: Some(-1),
            per_page: Some(2),
            sort: Some("name".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(params.page(), 1);
        assert_eq!(params.per_page(), 2);
        assert_eq!(params.sort(), Some("name"));
    }
}
