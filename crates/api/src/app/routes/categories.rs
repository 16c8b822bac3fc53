use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use catalog_application::UseCase;
use catalog_application::category::{DeleteCategoryInput, GetCategoryInput};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_category).get(list_categories))
        .route(
            "/:id",
            get(get_category)
                .patch(update_category)
                .delete(delete_category),
        )
}

pub async fn create_category(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::CreateCategoryRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match services.create_category().execute(body.into()).await {
        Ok(output) => (StatusCode::CREATED, Json(dto::data(&output))).into_response(),
        Err(e) => errors::application_error_to_response(e),
    }
}

pub async fn list_categories(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };

    match services
        .list_categories()
        .execute(dto::category_search_input(&query))
        .await
    {
        Ok(page) => (StatusCode::OK, Json(dto::collection(&page))).into_response(),
        Err(e) => errors::application_error_to_response(e),
    }
}

pub async fn get_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.get_category().execute(GetCategoryInput { id }).await {
        Ok(output) => (StatusCode::OK, Json(dto::data(&output))).into_response(),
        Err(e) => errors::application_error_to_response(e),
    }
}

pub async fn update_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::UpdateCategoryRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match services.update_category().execute(body.into_input(id)).await {
        Ok(output) => (StatusCode::OK, Json(dto::data(&output))).into_response(),
        Err(e) => errors::application_error_to_response(e),
    }
}

pub async fn delete_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services
        .delete_category()
        .execute(DeleteCategoryInput { id })
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::application_error_to_response(e),
    }
}
