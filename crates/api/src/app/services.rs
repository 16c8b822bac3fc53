//! Repository wiring: in-memory for dev/test, Postgres when configured.

use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use catalog_application::cast_member::{
    CreateCastMemberUseCase, DeleteCastMemberUseCase, GetCastMemberUseCase,
    ListCastMembersUseCase, UpdateCastMemberUseCase,
};
use catalog_application::category::{
    CreateCategoryUseCase, DeleteCategoryUseCase, GetCategoryUseCase, ListCategoriesUseCase,
    UpdateCategoryUseCase,
};
use catalog_cast_member::CastMemberRepository;
use catalog_category::CategoryRepository;
use catalog_infra::{
    CastMemberInMemoryRepository, CategoryInMemoryRepository, PostgresCastMemberRepository,
    PostgresCategoryRepository, ensure_schema,
};

use crate::config::{AppConfig, DatabaseConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    InMemory,
    Postgres,
}

/// Repositories shared by every request handler.
#[derive(Clone)]
pub struct AppServices {
    kind: StoreKind,
    categories: Arc<dyn CategoryRepository>,
    cast_members: Arc<dyn CastMemberRepository>,
}

impl AppServices {
    pub fn in_memory() -> Self {
        Self {
            kind: StoreKind::InMemory,
            categories: Arc::new(CategoryInMemoryRepository::new()),
            cast_members: Arc::new(CastMemberInMemoryRepository::new()),
        }
    }

    /// Connect to Postgres and make sure the catalog tables exist.
    pub async fn persistent(database: &DatabaseConfig) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(database.max_connections)
            .connect(&database.url)
            .await
            .context("failed to connect to Postgres")?;
        ensure_schema(&pool)
            .await
            .context("failed to prepare catalog schema")?;

        Ok(Self {
            kind: StoreKind::Postgres,
            categories: Arc::new(PostgresCategoryRepository::new(pool.clone())),
            cast_members: Arc::new(PostgresCastMemberRepository::new(pool)),
        })
    }

    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let services = match &config.database {
            Some(database) => Self::persistent(database).await?,
            None => Self::in_memory(),
        };
        info!(store = ?services.kind, "repositories ready");
        Ok(services)
    }

    pub fn kind(&self) -> StoreKind {
        self.kind
    }

    pub fn create_category(&self) -> CreateCategoryUseCase {
        CreateCategoryUseCase::new(self.categories.clone())
    }

    pub fn get_category(&self) -> GetCategoryUseCase {
        GetCategoryUseCase::new(self.categories.clone())
    }

    pub fn list_categories(&self) -> ListCategoriesUseCase {
        ListCategoriesUseCase::new(self.categories.clone())
    }

    pub fn update_category(&self) -> UpdateCategoryUseCase {
        UpdateCategoryUseCase::new(self.categories.clone())
    }

    pub fn delete_category(&self) -> DeleteCategoryUseCase {
        DeleteCategoryUseCase::new(self.categories.clone())
    }

    pub fn create_cast_member(&self) -> CreateCastMemberUseCase {
        CreateCastMemberUseCase::new(self.cast_members.clone())
    }

    pub fn get_cast_member(&self) -> GetCastMemberUseCase {
        GetCastMemberUseCase::new(self.cast_members.clone())
    }

    pub fn list_cast_members(&self) -> ListCastMembersUseCase {
        ListCastMembersUseCase::new(self.cast_members.clone())
    }

    pub fn update_cast_member(&self) -> UpdateCastMemberUseCase {
        UpdateCastMemberUseCase::new(self.cast_members.clone())
    }

    pub fn delete_cast_member(&self) -> DeleteCastMemberUseCase {
        DeleteCastMemberUseCase::new(self.cast_members.clone())
    }
}
