//! Cast member domain module.
//!
//! Cast members are the people credited on a video: directors and actors. Pure domain
//! logic only (no IO, no HTTP, no storage).

pub mod cast_member;
pub mod cast_member_type;
pub mod repository;

pub use cast_member::{CastMember, CastMemberCreateCommand, CastMemberId, CastMemberProps};
pub use cast_member_type::{CastMemberType, InvalidCastMemberTypeError};
pub use repository::{
    CastMemberFilter, CastMemberFilterInput, CastMemberRepository, CastMemberSearchParams,
    CastMemberSearchResult, SORTABLE_FIELDS, build_search_params,
};
