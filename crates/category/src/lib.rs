//! Category domain module.
//!
//! This crate contains the Category aggregate and its rules, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod category;
pub mod repository;

pub use category::{Category, CategoryCreateCommand, CategoryId, CategoryProps};
pub use repository::{
    CategoryFilter, CategoryRepository, CategorySearchParams, CategorySearchResult,
    SORTABLE_FIELDS,
};
