//! Application layer: one use case per catalog operation.
//!
//! Each use case performs one unit of work against a repository: build or load the
//! aggregate, mutate it, turn accumulated notification errors into an
//! entity-validation error, persist, and map the result to an output DTO.

pub mod cast_member;
pub mod category;
pub mod error;
pub mod pagination;
pub mod use_case;

pub use error::{ApplicationError, ApplicationResult};
pub use pagination::PaginationOutput;
pub use use_case::UseCase;
