//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: repository selection and use-case construction
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request bodies, query-string parsing and response presenters
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use crate::config::AppConfig;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router around already-wired services.
pub fn build_app(services: AppServices) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(ServiceBuilder::new().layer(Extension(Arc::new(services))))
}

/// Wire services from configuration and build the router (entrypoint used by `main.rs`).
pub async fn build_app_from_config(config: &AppConfig) -> anyhow::Result<Router> {
    let services = AppServices::from_config(config).await?;
    Ok(build_app(services))
}
