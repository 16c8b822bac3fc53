use axum::Router;

pub mod cast_members;
pub mod categories;
pub mod system;

/// Router for the catalog resources.
pub fn router() -> Router {
    Router::new()
        .nest("/categories", categories::router())
        .nest("/cast-members", cast_members::router())
}
