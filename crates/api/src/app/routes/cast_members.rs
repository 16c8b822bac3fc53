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
use catalog_application::cast_member::{DeleteCastMemberInput, GetCastMemberInput};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_cast_member).get(list_cast_members))
        .route(
            "/:id",
            get(get_cast_member)
                .patch(update_cast_member)
                .delete(delete_cast_member),
        )
}

pub async fn create_cast_member(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::CreateCastMemberRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match services.create_cast_member().execute(body.into()).await {
        Ok(output) => (StatusCode::CREATED, Json(dto::data(&output))).into_response(),
        Err(e) => errors::application_error_to_response(e),
    }
}

pub async fn list_cast_members(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };
    let input = match dto::cast_member_search_input(&query) {
        Ok(input) => input,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.list_cast_members().execute(input).await {
        Ok(page) => (StatusCode::OK, Json(dto::collection(&page))).into_response(),
        Err(e) => errors::application_error_to_response(e),
    }
}

pub async fn get_cast_member(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services
        .get_cast_member()
        .execute(GetCastMemberInput { id })
        .await
    {
        Ok(output) => (StatusCode::OK, Json(dto::data(&output))).into_response(),
        Err(e) => errors::application_error_to_response(e),
    }
}

pub async fn update_cast_member(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::UpdateCastMemberRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match services
        .update_cast_member()
        .execute(body.into_input(id))
        .await
    {
        Ok(output) => (StatusCode::OK, Json(dto::data(&output))).into_response(),
        Err(e) => errors::application_error_to_response(e),
    }
}

pub async fn delete_cast_member(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services
        .delete_cast_member()
        .execute(DeleteCastMemberInput { id })
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::application_error_to_response(e),
    }
}
