use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Row};
use tracing::{Span, instrument};
use uuid::Uuid;

use catalog_category::{Category, CategoryFilter, CategoryId, CategoryProps, SORTABLE_FIELDS};
use catalog_core::{
    DomainError, Entity, EntityId, ExistsById, Repository, RepositoryResult, SearchParams,
    SearchResult, SearchableRepository, dedup_ids,
};

use super::{TIE_BREAK, like_pattern, map_sqlx_error, order_clause, to_i64};

/// Stored shape of a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRow {
    pub category_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, PgRow> for CategoryRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(CategoryRow {
            category_id: row.try_get("category_id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl From<&Category> for CategoryRow {
    fn from(category: &Category) -> Self {
        Self {
            category_id: *category.category_id().0.as_uuid(),
            name: category.name().to_string(),
            description: category.description().map(str::to_string),
            is_active: category.is_active(),
            created_at: category.created_at(),
        }
    }
}

impl CategoryRow {
    /// Rebuild the aggregate, re-checking every rule against the stored state.
    pub fn into_entity(self) -> RepositoryResult<Category> {
        let mut category = Category::new(CategoryProps {
            category_id: Some(CategoryId(EntityId::from_uuid(self.category_id))),
            name: self.name,
            description: self.description,
            is_active: Some(self.is_active),
            created_at: Some(self.created_at),
        });
        if !category.validate(None) {
            return Err(DomainError::EntityValidation(category.notification().to_json()).into());
        }
        Ok(category)
    }
}

fn rows_into_entities(rows: Vec<CategoryRow>) -> RepositoryResult<Vec<Category>> {
    rows.into_iter().map(CategoryRow::into_entity).collect()
}

fn uuids(ids: &[CategoryId]) -> Vec<Uuid> {
    ids.iter().map(|id| *id.0.as_uuid()).collect()
}

const SELECT_COLUMNS: &str = "category_id, name, description, is_active, created_at";

/// Postgres category repository.
#[derive(Debug, Clone)]
pub struct PostgresCategoryRepository {
    pool: Arc<PgPool>,
}

impl PostgresCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[async_trait]
impl Repository<Category> for PostgresCategoryRepository {
    #[instrument(skip(self, entity), fields(category_id = %entity.category_id()), err)]
    async fn insert(&self, entity: Category) -> RepositoryResult<()> {
        let row = CategoryRow::from(&entity);
        sqlx::query(
            r#"
            INSERT INTO categories (category_id, name, description, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(row.category_id)
        .bind(&row.name)
        .bind(&row.description)
        .bind(row.is_active)
        .bind(row.created_at)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert", e))?;
        Ok(())
    }

    #[instrument(skip(self, entities), fields(count = entities.len()), err)]
    async fn bulk_insert(&self, entities: Vec<Category>) -> RepositoryResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("bulk_insert", e))?;
        for entity in &entities {
            let row = CategoryRow::from(entity);
            sqlx::query(
                r#"
                INSERT INTO categories (category_id, name, description, is_active, created_at)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(row.category_id)
            .bind(&row.name)
            .bind(&row.description)
            .bind(row.is_active)
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

    #[instrument(skip(self), fields(category_id = %id), err)]
    async fn find_by_id(&self, id: &CategoryId) -> RepositoryResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM categories WHERE category_id = $1"
        ))
        .bind(id.0.as_uuid())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_id", e))?;
        row.map(CategoryRow::into_entity).transpose()
    }

    #[instrument(skip(self, ids), fields(requested = ids.len()), err)]
    async fn find_by_ids(&self, ids: &[CategoryId]) -> RepositoryResult<Vec<Category>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query_as::<_, CategoryRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM categories WHERE category_id = ANY($1)"
        ))
        .bind(uuids(ids))
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_ids", e))?;
        rows_into_entities(rows)
    }

    #[instrument(skip(self, ids), fields(requested = ids.len()), err)]
    async fn exists_by_id(&self, ids: &[CategoryId]) -> RepositoryResult<ExistsById<CategoryId>> {
        let ids = dedup_ids(ids)?;
        let found: Vec<Uuid> =
            sqlx::query_scalar("SELECT category_id FROM categories WHERE category_id = ANY($1)")
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

    #[instrument(skip(self, entity), fields(category_id = %entity.category_id()), err)]
    async fn update(&self, entity: Category) -> RepositoryResult<()> {
        let row = CategoryRow::from(&entity);
        let result = sqlx::query(
            r#"
            UPDATE categories
            SET name = $2, description = $3, is_active = $4
            WHERE category_id = $1
            "#,
        )
        .bind(row.category_id)
        .bind(&row.name)
        .bind(&row.description)
        .bind(row.is_active)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update", e))?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(Category::NAME, entity.category_id()).into());
        }
        Ok(())
    }

    #[instrument(skip(self), fields(category_id = %id), err)]
    async fn delete(&self, id: &CategoryId) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM categories WHERE category_id = $1")
            .bind(id.0.as_uuid())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(Category::NAME, id).into());
        }
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn find_all(&self) -> RepositoryResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM categories ORDER BY {TIE_BREAK}"
        ))
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_all", e))?;
        rows_into_entities(rows)
    }
}

#[async_trait]
impl SearchableRepository<Category, CategoryFilter> for PostgresCategoryRepository {
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
        params: &SearchParams<CategoryFilter>,
    ) -> RepositoryResult<SearchResult<Category>> {
        let pattern = params.filter().map(|f| like_pattern(f));

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM categories
            WHERE ($1::text IS NULL OR name ILIKE $1)
            "#,
        )
        .bind(&pattern)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("search", e))?;
        Span::current().record("total", total);

        let order = order_clause(params.sort(), params.sort_dir(), SORTABLE_FIELDS);
        let rows = sqlx::query_as::<_, CategoryRow>(&format!(
            r#"
            SELECT {SELECT_COLUMNS} FROM categories
            WHERE ($1::text IS NULL OR name ILIKE $1)
            ORDER BY {order}
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(&pattern)
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
    use catalog_category::CategoryCreateCommand;
    use chrono::TimeZone;
    use proptest::prelude::*;

    #[test]
    fn invalid_stored_row_is_rejected() {
        let row = CategoryRow {
            category_id: Uuid::new_v4(),
            name: "a".repeat(256),
            description: Some("short".to_string()),
            is_active: true,
            created_at: Utc::now(),
        };
        let err = row.into_entity().unwrap_err();
        assert_eq!(err.to_string(), "Entity Validation Error");
        match err {
            catalog_core::RepositoryError::Domain(DomainError::EntityValidation(entries)) => {
                assert_eq!(entries.len(), 2);
            }
            other => panic!("expected entity validation error, got {other:?}"),
        }
    }

    #[test]
    fn freshly_created_category_survives_storage_unchanged() {
        let category = Category::create(CategoryCreateCommand {
            name: "Movie".to_string(),
            description: Some("some description".to_string()),
            is_active: None,
        });
        let restored = CategoryRow::from(&category).into_entity().unwrap();
        assert_eq!(restored.to_json(), category.to_json());
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 200, ..ProptestConfig::default() })]

        #[test]
        fn row_mapping_preserves_state(
            name in "[a-zA-Z ]{1,255}",
            description in proptest::option::of("[a-z ]{8,255}"),
            is_active in any::<bool>(),
            secs in 0i64..4_000_000_000,
        ) {
            let created_at = Utc.timestamp_opt(secs, 0).unwrap();
            let mut category = Category::create(CategoryCreateCommand {
                name,
                description,
                is_active: Some(is_active),
            });
            prop_assert!(!category.notification().has_errors());
            category = Category::new(CategoryProps {
                category_id: Some(category.category_id()),
                name: category.name().to_string(),
                description: category.description().map(str::to_string),
                is_active: Some(category.is_active()),
                created_at: Some(created_at),
            });

            let row = CategoryRow::from(&category);
            let restored = row.clone().into_entity().unwrap();
            prop_assert_eq!(CategoryRow::from(&restored), row);
            prop_assert_eq!(restored.to_json(), category.to_json());
        }
    }
}
