//! Postgres-backed repositories.
//!
//! ## Error Mapping
//!
//! SQLx errors are mapped to [`RepositoryError::Storage`] with the failing operation in the
//! message:
//!
//! | SQLx Error | PostgreSQL Error Code | Message prefix |
//! |------------|----------------------|----------------|
//! | Database (unique violation) | `23505` | `duplicate key in <op>` |
//! | Database (foreign key / check violation) | `23503` / `23514` | `constraint violation in <op>` |
//! | Database (other) | Any other | `database error in <op>` |
//! | PoolClosed | N/A | `connection pool closed in <op>` |
//! | RowNotFound | N/A | `unexpected row not found in <op>` |
//! | Other | N/A | `sqlx error in <op>` |
//!
//! Not-found on update/delete is detected from `rows_affected() == 0` and surfaces as a
//! domain not-found error, exactly like the in-memory repositories.
//!
//! ## Search
//!
//! Filters become `ILIKE` patterns (with `%`, `_` and `\` escaped), sorting is restricted to
//! the aggregate's sortable fields and `name` sorts with the `"C"` collation so results come
//! back in the same byte order the in-memory repositories use. Every ORDER BY ends with the
//! `seq` insertion sequence, matching the stable sort of the in-memory repositories.

pub mod cast_member;
pub mod category;
pub mod schema;

use catalog_core::{RepositoryError, SortDirection};

pub use cast_member::{CastMemberRow, PostgresCastMemberRepository};
pub use category::{CategoryRow, PostgresCategoryRepository};
pub use schema::ensure_schema;

pub(crate) fn map_sqlx_error(operation: &str, err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::Database(db_err) => {
            let prefix = match db_err.code().as_deref() {
                Some("23505") => "duplicate key",
                Some("23503") | Some("23514") => "constraint violation",
                _ => "database error",
            };
            RepositoryError::storage(format!("{prefix} in {operation}: {}", db_err.message()))
        }
        sqlx::Error::PoolClosed => {
            RepositoryError::storage(format!("connection pool closed in {operation}"))
        }
        sqlx::Error::RowNotFound => {
            RepositoryError::storage(format!("unexpected row not found in {operation}"))
        }
        _ => RepositoryError::storage(format!("sqlx error in {operation}: {err}")),
    }
}

/// `%needle%` with LIKE metacharacters escaped.
pub(crate) fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Insertion sequence; breaks ties so LIMIT/OFFSET pages never overlap.
pub(crate) const TIE_BREAK: &str = "seq ASC";

/// ORDER BY clause for a search. Only allowlisted field names are ever interpolated.
pub(crate) fn order_clause(
    sort: Option<&str>,
    sort_dir: Option<SortDirection>,
    sortable: &[&str],
) -> String {
    let primary = match sort.and_then(|field| sortable.iter().find(|f| **f == field)) {
        Some(field) => {
            let dir = sort_dir.unwrap_or(SortDirection::Asc).as_str().to_uppercase();
            if *field == "name" {
                format!("name COLLATE \"C\" {dir}")
            } else {
                format!("{field} {dir}")
            }
        }
        None => "created_at DESC".to_string(),
    };
    format!("{primary}, {TIE_BREAK}")
}

pub(crate) fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
