use sqlx::PgPool;
use tracing::{info, instrument};

use catalog_core::RepositoryResult;

use super::map_sqlx_error;

const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS categories (
        category_id UUID PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        description TEXT NULL,
        is_active BOOLEAN NOT NULL DEFAULT TRUE,
        created_at TIMESTAMPTZ NOT NULL,
        seq BIGSERIAL NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS cast_members (
        cast_member_id UUID PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        type INTEGER NOT NULL,
        created_at TIMESTAMPTZ NOT NULL,
        seq BIGSERIAL NOT NULL
    )
    "#,
    r#"ALTER TABLE categories ADD COLUMN IF NOT EXISTS seq BIGSERIAL NOT NULL"#,
    r#"ALTER TABLE cast_members ADD COLUMN IF NOT EXISTS seq BIGSERIAL NOT NULL"#,
    r#"CREATE INDEX IF NOT EXISTS categories_created_at_idx ON categories (created_at)"#,
    r#"CREATE INDEX IF NOT EXISTS cast_members_created_at_idx ON cast_members (created_at)"#,
];

/// Create the catalog tables when they do not exist yet.
#[instrument(skip(pool), err)]
pub async fn ensure_schema(pool: &PgPool) -> RepositoryResult<()> {
    for statement in STATEMENTS {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
    }
    info!(tables = 2, "catalog schema ready");
    Ok(())
}
