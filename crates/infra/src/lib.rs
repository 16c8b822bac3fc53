//! Infrastructure layer: repository implementations.
//!
//! - [`in_memory`]: searchable repositories over process memory (tests, development).
//! - [`postgres`]: sqlx-backed repositories and schema bootstrap.

pub mod in_memory;
pub mod postgres;

pub use in_memory::{CastMemberInMemoryRepository, CategoryInMemoryRepository};
pub use postgres::{PostgresCastMemberRepository, PostgresCategoryRepository, ensure_schema};
