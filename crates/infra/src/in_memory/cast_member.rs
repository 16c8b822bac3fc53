use catalog_cast_member::{CastMember, CastMemberFilter, SORTABLE_FIELDS};

use super::{InMemorySearchableRepository, SearchStrategy};

/// Cast member search: name substring and/or exact type; both must hold when both are set.
#[derive(Debug)]
pub struct CastMemberSearch;

impl SearchStrategy<CastMember> for CastMemberSearch {
    type Filter = CastMemberFilter;

    const SORTABLE_FIELDS: &'static [&'static str] = SORTABLE_FIELDS;

    fn matches(entity: &CastMember, filter: &CastMemberFilter) -> bool {
        let name_ok = filter
            .name
            .as_deref()
            .is_none_or(|name| entity.name().to_lowercase().contains(&name.to_lowercase()));
        let type_ok = filter
            .member_type
            .is_none_or(|member_type| entity.member_type() == member_type);
        name_ok && type_ok
    }
}

pub type CastMemberInMemoryRepository = InMemorySearchableRepository<CastMember, CastMemberSearch>;

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_cast_member::{
        CastMemberFilterInput, CastMemberProps, CastMemberType, build_search_params,
    };
    use catalog_core::{SearchInput, SearchableRepository};
    use chrono::{Duration, Utc};

    fn member(name: &str, member_type: CastMemberType, offset_secs: i64) -> CastMember {
        CastMember::new(CastMemberProps {
            cast_member_id: None,
            name: name.to_string(),
            member_type,
            created_at: Some(Utc::now() + Duration::seconds(offset_secs)),
        })
    }

    fn repo() -> CastMemberInMemoryRepository {
        CastMemberInMemoryRepository::with_items(vec![
            member("John Doe", CastMemberType::Actor, 0),
            member("Jane Roe", CastMemberType::Director, 1),
            member("johnny", CastMemberType::Director, 2),
            member("Bob", CastMemberType::Actor, 3),
        ])
    }

    async fn search_names(name: Option<&str>, member_type: Option<i64>) -> Vec<String> {
        let params = build_search_params(SearchInput {
            filter: Some(CastMemberFilterInput {
                name: name.map(str::to_string),
                member_type,
            }),
            ..Default::default()
        })
        .unwrap();
        repo()
            .search(&params)
            .await
            .unwrap()
            .into_items()
            .into_iter()
            .map(|m| m.name().to_string())
            .collect()
    }

    #[tokio::test]
    async fn filters_by_name_type_or_both() {
        assert_eq!(search_names(Some("JOHN"), None).await, vec!["johnny", "John Doe"]);
        assert_eq!(search_names(None, Some(2)).await, vec!["Bob", "John Doe"]);
        assert_eq!(search_names(Some("john"), Some(1)).await, vec!["johnny"]);
        assert_eq!(search_names(None, None).await.len(), 4);
    }
}
