//! Category use cases.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use catalog_category::{
    Category, CategoryCreateCommand, CategoryFilter, CategoryId, CategoryRepository,
    CategorySearchParams,
};
use catalog_core::{DomainError, Entity, Repository, SearchInput, SearchableRepository};

use crate::error::ApplicationResult;
use crate::pagination::PaginationOutput;
use crate::use_case::UseCase;

/// Category as returned to callers; the identifier is exposed as `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOutput {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Category> for CategoryOutput {
    fn from(category: &Category) -> Self {
        Self {
            id: category.category_id().to_string(),
            name: category.name().to_string(),
            description: category.description().map(str::to_string),
            is_active: category.is_active(),
            created_at: category.created_at(),
        }
    }
}

fn ensure_valid(category: &Category) -> ApplicationResult<()> {
    if category.notification().has_errors() {
        warn!(category_id = %category.category_id(), "category failed validation");
        return Err(DomainError::EntityValidation(category.notification().to_json()).into());
    }
    Ok(())
}

async fn load(repo: &dyn CategoryRepository, raw_id: &str) -> ApplicationResult<Category> {
    let id = CategoryId::parse(raw_id)?;
    repo.find_by_id(&id)
        .await?
        .ok_or_else(|| DomainError::not_found(Category::NAME, raw_id).into())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateCategoryInput {
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

pub struct CreateCategoryUseCase {
    repo: Arc<dyn CategoryRepository>,
}

impl CreateCategoryUseCase {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UseCase for CreateCategoryUseCase {
    type Input = CreateCategoryInput;
    type Output = CategoryOutput;

    async fn execute(&self, input: Self::Input) -> ApplicationResult<Self::Output> {
        let category = Category::create(CategoryCreateCommand {
            name: input.name,
            description: input.description,
            is_active: input.is_active,
        });
        ensure_valid(&category)?;

        self.repo.insert(category.clone()).await?;
        info!(category_id = %category.category_id(), "category created");
        Ok(CategoryOutput::from(&category))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetCategoryInput {
    pub id: String,
}

pub struct GetCategoryUseCase {
    repo: Arc<dyn CategoryRepository>,
}

impl GetCategoryUseCase {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UseCase for GetCategoryUseCase {
    type Input = GetCategoryInput;
    type Output = CategoryOutput;

    async fn execute(&self, input: Self::Input) -> ApplicationResult<Self::Output> {
        let category = load(self.repo.as_ref(), &input.id).await?;
        Ok(CategoryOutput::from(&category))
    }
}

pub type ListCategoriesInput = SearchInput<CategoryFilter>;

pub type ListCategoriesOutput = PaginationOutput<CategoryOutput>;

pub struct ListCategoriesUseCase {
    repo: Arc<dyn CategoryRepository>,
}

impl ListCategoriesUseCase {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UseCase for ListCategoriesUseCase {
    type Input = ListCategoriesInput;
    type Output = ListCategoriesOutput;

    async fn execute(&self, input: Self::Input) -> ApplicationResult<Self::Output> {
        let params = CategorySearchParams::new(input);
        debug!(page = params.page(), per_page = params.per_page(), "searching categories");
        let result = self.repo.search(&params).await?;
        Ok(PaginationOutput::from_search_result(result, |c| {
            CategoryOutput::from(&c)
        }))
    }
}

/// Partial update. `description: Some(None)` clears the description; `None` leaves it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateCategoryInput {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub is_active: Option<bool>,
}

pub struct UpdateCategoryUseCase {
    repo: Arc<dyn CategoryRepository>,
}

impl UpdateCategoryUseCase {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UseCase for UpdateCategoryUseCase {
    type Input = UpdateCategoryInput;
    type Output = CategoryOutput;

    async fn execute(&self, input: Self::Input) -> ApplicationResult<Self::Output> {
        let mut category = load(self.repo.as_ref(), &input.id).await?;

        if let Some(name) = input.name.filter(|n| !n.is_empty()) {
            category.change_name(name);
        }
        if let Some(description) = input.description {
            category.change_description(description);
        }
        match input.is_active {
            Some(true) => category.activate(),
            Some(false) => category.deactivate(),
            None => {}
        }
        ensure_valid(&category)?;

        self.repo.update(category.clone()).await?;
        info!(category_id = %category.category_id(), "category updated");
        Ok(CategoryOutput::from(&category))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteCategoryInput {
    pub id: String,
}

pub struct DeleteCategoryUseCase {
    repo: Arc<dyn CategoryRepository>,
}

impl DeleteCategoryUseCase {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UseCase for DeleteCategoryUseCase {
    type Input = DeleteCategoryInput;
    type Output = ();

    async fn execute(&self, input: Self::Input) -> ApplicationResult<Self::Output> {
        let id = CategoryId::parse(&input.id)?;
        self.repo.delete(&id).await?;
        info!(category_id = %id, "category deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApplicationError;
    use catalog_category::CategoryProps;
    use catalog_infra::in_memory::CategoryInMemoryRepository;
    use chrono::Duration;

    fn repo() -> Arc<CategoryInMemoryRepository> {
        Arc::new(CategoryInMemoryRepository::new())
    }

    fn category(name: &str, created_at: DateTime<Utc>) -> Category {
        Category::new(CategoryProps {
            name: name.to_string(),
            created_at: Some(created_at),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn create_persists_and_maps_output() {
        let repo = repo();
        let use_case = CreateCategoryUseCase::new(repo.clone());

        let output = use_case
            .execute(CreateCategoryInput {
                name: "Movie".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(output.name, "Movie");
        assert_eq!(output.description, None);
        assert!(output.is_active);

        let stored = repo.find_all().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].category_id().to_string(), output.id);
    }

    #[tokio::test]
    async fn create_rejects_invalid_category_without_persisting() {
        let repo = repo();
        let use_case = CreateCategoryUseCase::new(repo.clone());

        let err = use_case
            .execute(CreateCategoryInput {
                name: "t".repeat(256),
                ..Default::default()
            })
            .await
            .unwrap_err();

        match err {
            ApplicationError::Domain(DomainError::EntityValidation(entries)) => {
                let json = serde_json::to_value(&entries).unwrap();
                assert_eq!(
                    json,
                    serde_json::json!([{
                        "name": ["name must be shorter than or equal to 255 characters"]
                    }])
                );
            }
            other => panic!("expected entity validation error, got {other:?}"),
        }
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_reports_invalid_and_missing_ids() {
        let use_case = GetCategoryUseCase::new(repo());

        let err = use_case
            .execute(GetCategoryInput {
                id: "fake id".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ApplicationError::Domain(DomainError::InvalidId("ID must be a valid UUID".to_string()))
        );

        let id = CategoryId::new().to_string();
        let err = use_case
            .execute(GetCategoryInput { id: id.clone() })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), format!("Category with id {id} not found"));
    }

    #[tokio::test]
    async fn get_returns_stored_category() {
        let repo = repo();
        let stored = category("Movie", Utc::now());
        repo.insert(stored.clone()).await.unwrap();

        let output = GetCategoryUseCase::new(repo)
            .execute(GetCategoryInput {
                id: stored.category_id().to_string(),
            })
            .await
            .unwrap();
        assert_eq!(output, CategoryOutput::from(&stored));
    }

    #[tokio::test]
    async fn list_defaults_to_newest_first() {
        let repo = repo();
        let now = Utc::now();
        let items = vec![
            category("first", now),
            category("second", now + Duration::seconds(1)),
            category("third", now + Duration::seconds(2)),
        ];
        repo.bulk_insert(items).await.unwrap();

        let output = ListCategoriesUseCase::new(repo)
            .execute(ListCategoriesInput::default())
            .await
            .unwrap();

        let names: Vec<_> = output.items.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["third", "second", "first"]);
        assert_eq!(output.total, 3);
        assert_eq!(output.current_page, 1);
        assert_eq!(output.per_page, 15);
        assert_eq!(output.last_page, 1);
    }

    #[tokio::test]
    async fn list_filters_sorts_and_paginates() {
        let repo = repo();
        let now = Utc::now();
        let items = ["b", "a", "d", "e", "c"]
            .iter()
            .enumerate()
            .map(|(i, n)| category(n, now + Duration::seconds(i as i64)))
            .collect();
        repo.bulk_insert(items).await.unwrap();

        let output = ListCategoriesUseCase::new(repo)
            .execute(ListCategoriesInput {
                page: Some(2),
                per_page: Some(2),
                sort: Some("name".to_string()),
                sort_dir: Some("desc".to_string()),
                filter: None,
            })
            .await
            .unwrap();

        let names: Vec<_> = output.items.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["c", "b"]);
        assert_eq!(output.total, 5);
        assert_eq!(output.last_page, 3);
    }

    #[tokio::test]
    async fn update_applies_partial_changes() {
        let repo = repo();
        let stored = Category::new(CategoryProps {
            name: "Movie".to_string(),
            description: Some("some description".to_string()),
            ..Default::default()
        });
        repo.insert(stored.clone()).await.unwrap();
        let use_case = UpdateCategoryUseCase::new(repo.clone());
        let id = stored.category_id().to_string();

        let output = use_case
            .execute(UpdateCategoryInput {
                id: id.clone(),
                name: Some("Documentary".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(output.name, "Documentary");
        assert_eq!(output.description.as_deref(), Some("some description"));
        assert!(output.is_active);

        let output = use_case
            .execute(UpdateCategoryInput {
                id: id.clone(),
                description: Some(None),
                is_active: Some(false),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(output.name, "Documentary");
        assert_eq!(output.description, None);
        assert!(!output.is_active);

        let output = use_case
            .execute(UpdateCategoryInput {
                id,
                is_active: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(output.is_active);

        let persisted = repo.find_all().await.unwrap();
        assert_eq!(persisted[0].name(), "Documentary");
        assert!(persisted[0].is_active());
    }

    #[tokio::test]
    async fn update_rejects_invalid_changes() {
        let repo = repo();
        let stored = category("Movie", Utc::now());
        repo.insert(stored.clone()).await.unwrap();

        let err = UpdateCategoryUseCase::new(repo.clone())
            .execute(UpdateCategoryInput {
                id: stored.category_id().to_string(),
                description: Some(Some("short".to_string())),
                ..Default::default()
            })
            .await
            .unwrap_err();
        match err {
            ApplicationError::Domain(e @ DomainError::EntityValidation(_)) => {
                assert_eq!(
                    e.messages(),
                    vec!["description must be longer than or equal to 8 characters".to_string()]
                );
            }
            other => panic!("expected entity validation error, got {other:?}"),
        }
        assert_eq!(repo.find_all().await.unwrap()[0].description(), None);
    }

    #[tokio::test]
    async fn update_missing_category_is_not_found() {
        let err = UpdateCategoryUseCase::new(repo())
            .execute(UpdateCategoryInput {
                id: CategoryId::new().to_string(),
                name: Some("x".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::NotFound { entity: "Category", .. })
        ));
    }

    #[tokio::test]
    async fn delete_removes_and_then_reports_not_found() {
        let repo = repo();
        let stored = category("Movie", Utc::now());
        repo.insert(stored.clone()).await.unwrap();
        let use_case = DeleteCategoryUseCase::new(repo.clone());
        let input = DeleteCategoryInput {
            id: stored.category_id().to_string(),
        };

        use_case.execute(input.clone()).await.unwrap();
        assert!(repo.find_all().await.unwrap().is_empty());

        let err = use_case.execute(input).await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::NotFound { .. })
        ));
    }
}
