use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Row};
use tracing::{Span, instrument};
use uuid::Uuid;

use catalog_cast_member::{
    CastMember, CastMemberFilter, CastMemberId, CastMemberProps, CastMemberType, SORTABLE_FIELDS,
};
use catalog_core::{
    DomainError, Entity, EntityId, ExistsById, NotificationEntry, Repository, RepositoryResult,
    SearchParams, SearchResult, SearchableRepository, dedup_ids,
};

use super::{TIE_BREAK, like_pattern, map_sqlx_error, order_clause, to_i64};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastMemberRow {
    pub cast_member_id: Uuid,
    pub name: String,
    pub member_type: i32,
    pub created_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, PgRow> for CastMemberRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(CastMemberRow {
            cast_member_id: row.try_get("cast_member_id")?,
            name: row.try_get("name")?,
            member_type: row.try_get("type")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl From<&CastMember> for CastMemberRow {
    fn from(member: &CastMember) -> Self {
        Self {
            cast_member_id: *member.cast_member_id().0.as_uuid(),
            name: member.name().to_string(),
            member_type: type_code(member.member_type()),
            created_at: member.created_at(),
        }
    }
}

impl CastMemberRow {
    /// Rebuild the aggregate. An unknown stored type code or a name that breaks the rules
    /// is reported as an entity validation error.
    pub fn into_entity(self) -> RepositoryResult<CastMember> {
        let member_type = CastMemberType::create(i64::from(self.member_type)).map_err(|e| {
            DomainError::EntityValidation(vec![NotificationEntry::field("type", vec![e.to_string()])])
        })?;
        let mut member = CastMember::new(CastMemberProps {
            cast_member_id: Some(CastMemberId(EntityId::from_uuid(self.cast_member_id))),
            name: self.name,
            member_type,
            created_at: Some(self.created_at),
        });
        if !member.validate(None) {
            return Err(DomainError::EntityValidation(member.notification().to_json()).into());
        }
        Ok(member)
    }
}

fn type_code(member_type: CastMemberType) -> i32 {
    match member_type {
        CastMemberType::Director => 1,
        CastMemberType::Actor => 2,
    }
}

fn rows_into_entities(rows: Vec<CastMemberRow>) -> RepositoryResult<Vec<CastMember>> {
    rows.into_iter().map(CastMemberRow::into_entity).collect()
}

fn uuids(ids: &[CastMemberId]) -> Vec<Uuid> {
    ids.iter().map(|id| *id.0.as_uuid()).collect()
}

const SELECT_COLUMNS: &str = "cast_member_id, name, type, created_at";

const INSERT: &str = r#"
    INSERT INTO cast_members (cast_member_id, name, type, created_at)
    VALUES ($1, $2, $3, $4)
"#;

const SEARCH_WHERE: &str = r#"
    WHERE ($1::text IS NULL OR name ILIKE $1)
      AND ($2::int IS NULL OR type = $2)
"#;

/// Postgres cast member repository.
#[derive(Debug, Clone)]
pub struct PostgresCastMemberRepository {
    pool: Arc<PgPool>,
}

impl PostgresCastMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[async_trait]
impl Repository<CastMember> for PostgresCastMemberRepository {
    #[instrument(skip(self, entity), fields(cast_member_id = %entity.cast_member_id()), err)]
    async fn insert(&self, entity: CastMember) -> RepositoryResult<()> {
        let row = CastMemberRow::from(&entity);
        sqlx::query(INSERT)
            .bind(row.cast_member_id)
            .bind(&row.name)
            .bind(row.member_type)
            .bind(row.created_at)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("insert", e))?;
        Ok(())
    }

    #[instrument(skip(self, entities), fields(count = entities.len()), err)]
    async fn bulk_insert(&self, entities: Vec<CastMember>) -> RepositoryResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("bulk_insert", e))?;
        for entity in &entities {
            let row = CastMemberRow::from(entity);
            sqlx::query(INSERT)
                .bind(row.cast_member_id)
                .bind(&row.name)
                .bind(row.member_type)
                .bind(row.created_at)
                .execute(&mut *tx)
                .await
                .map_err(|e| map_sqlx_error("bulk_insert", e))?;
        }
        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("bulk_insert", e))?;
        Ok(())
    }

    #[instrument(skip(self), fields(cast_member_id = %id), err)]
    async fn find_by_id(&self, id: &CastMemberId) -> RepositoryResult<Option<CastMember>> {
        let row = sqlx::query_as::<_, CastMemberRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM cast_members WHERE cast_member_id = $1"
        ))
        .bind(id.0.as_uuid())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_id", e))?;
        row.map(CastMemberRow::into_entity).transpose()
    }

    #[instrument(skip(self, ids), fields(requested = ids.len()), err)]
    async fn find_by_ids(&self, ids: &[CastMemberId]) -> RepositoryResult<Vec<CastMember>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query_as::<_, CastMemberRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM cast_members WHERE cast_member_id = ANY($1)"
        ))
        .bind(uuids(ids))
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_ids", e))?;
        rows_into_entities(rows)
    }

    #[instrument(skip(self, ids), fields(requested = ids.len()), err)]
    async fn exists_by_id(
        &self,
        ids: &[CastMemberId],
    ) -> RepositoryResult<ExistsById<CastMemberId>> {
        let ids = dedup_ids(ids)?;
        let found: Vec<Uuid> = sqlx::query_scalar(
            "SELECT cast_member_id FROM cast_members WHERE cast_member_id = ANY($1)",
        )
        .bind(uuids(&ids))
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("exists_by_id", e))?;
        let found: HashSet<Uuid> = found.into_iter().collect();
        let (exists, not_exists) = ids
            .into_iter()
            .partition(|id| found.contains(id.0.as_uuid()));
        Ok(ExistsById { exists, not_exists })
    }

    #[instrument(skip(self, entity), fields(cast_member_id = %entity.cast_member_id()), err)]
    async fn update(&self, entity: CastMember) -> RepositoryResult<()> {
        let row = CastMemberRow::from(&entity);
        let result = sqlx::query(
            r#"
            UPDATE cast_members
            SET name = $2, type = $3
            WHERE cast_member_id = $1
            "#,
        )
        .bind(row.cast_member_id)
        .bind(&row.name)
        .bind(row.member_type)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update", e))?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(CastMember::NAME, entity.cast_member_id()).into());
        }
        Ok(())
    }

    #[instrument(skip(self), fields(cast_member_id = %id), err)]
    async fn delete(&self, id: &CastMemberId) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM cast_members WHERE cast_member_id = $1")
            .bind(id.0.as_uuid())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(CastMember::NAME, id).into());
        }
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn find_all(&self) -> RepositoryResult<Vec<CastMember>> {
        let rows = sqlx::query_as::<_, CastMemberRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM cast_members ORDER BY {TIE_BREAK}"
        ))
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_all", e))?;
        rows_into_entities(rows)
    }
}

#[async_trait]
impl SearchableRepository<CastMember, CastMemberFilter> for PostgresCastMemberRepository {
    fn sortable_fields(&self) -> &[&'static str] {
        SORTABLE_FIELDS
    }

    #[instrument(
        skip(self, params),
        fields(page = params.page(), per_page = params.per_page(), total = tracing::field::Empty),
        err
    )]
    async fn search(
        &self,
        params: &SearchParams<CastMemberFilter>,
    ) -> RepositoryResult<SearchResult<CastMember>> {
        let pattern = params
            .filter()
            .and_then(|f| f.name.as_deref())
            .map(like_pattern);
        let member_type = params
            .filter()
            .and_then(|f| f.member_type)
            .map(type_code);

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM cast_members {SEARCH_WHERE}"
        ))
        .bind(&pattern)
        .bind(member_type)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("search", e))?;
        Span::current().record("total", total);

        let order = order_clause(params.sort(), params.sort_dir(), SORTABLE_FIELDS);
        let rows = sqlx::query_as::<_, CastMemberRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM cast_members {SEARCH_WHERE} ORDER BY {order} LIMIT $3 OFFSET $4"
        ))
        .bind(&pattern)
        .bind(member_type)
        .bind(to_i64(params.limit()))
        .bind(to_i64(params.offset()))
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("search", e))?;

        Ok(SearchResult::new(
            rows_into_entities(rows)?,
            u64::try_from(total).unwrap_or_default(),
            params.page(),
            params.per_page(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_cast_member::CastMemberCreateCommand;

    fn row(name: &str, member_type: i32) -> CastMemberRow {
        CastMemberRow {
            cast_member_id: Uuid::new_v4(),
            name: name.to_string(),
            member_type,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn row_round_trip() {
        let original = row("John Doe", 1);
        let member = original.clone().into_entity().unwrap();
        assert_eq!(member.member_type(), CastMemberType::Director);
        assert_eq!(member.cast_member_id().0.as_uuid(), &original.cast_member_id);
        assert_eq!(CastMemberRow::from(&member), original);
        assert_eq!(
            CastMemberRow::from(&member).into_entity().unwrap().to_json(),
            member.to_json()
        );
    }

    #[test]
    fn freshly_created_member_survives_storage_unchanged() {
        for member_type in [CastMemberType::Director, CastMemberType::Actor] {
            let member = CastMember::create(CastMemberCreateCommand {
                name: "John Doe".to_string(),
                member_type,
            });
            let restored = CastMemberRow::from(&member).into_entity().unwrap();
            assert_eq!(restored.to_json(), member.to_json());
        }
    }

    #[test]
    fn unknown_type_code_is_a_validation_error() {
        let err = row("John Doe", 9).into_entity().unwrap_err();
        match err {
            catalog_core::RepositoryError::Domain(e @ DomainError::EntityValidation(_)) => {
                assert_eq!(e.messages(), vec!["Invalid cast member type: 9".to_string()]);
            }
            other => panic!("expected entity validation error, got {other:?}"),
        }
    }

    #[test]
    fn empty_stored_name_is_a_validation_error() {
        let err = row("", 2).into_entity().unwrap_err();
        assert_eq!(err.to_string(), "Entity Validation Error");
    }
}
