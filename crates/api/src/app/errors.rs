use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::{json, Value};
use tracing::error;

use catalog_application::ApplicationError;
use catalog_core::DomainError;

pub fn application_error_to_response(err: ApplicationError) -> axum::response::Response {
    match err {
        ApplicationError::Domain(err) => domain_error_to_response(err),
        ApplicationError::Storage(msg) => {
            error!(error = %msg, "storage failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match &err {
        DomainError::EntityValidation(_) | DomainError::SearchValidation(_) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, err.messages())
        }
        DomainError::InvalidId(msg) => json_error(StatusCode::UNPROCESSABLE_ENTITY, msg.as_str()),
        DomainError::NotFound { .. } => json_error(StatusCode::NOT_FOUND, err.to_string()),
        DomainError::InvalidArgument(msg) => json_error(StatusCode::BAD_REQUEST, msg.as_str()),
    }
}

pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
}

pub fn query_rejection_to_response(rejection: QueryRejection) -> axum::response::Response {
    json_error(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
}

/// `{"statusCode", "error", "message"}` with the status reason as `error`.
pub fn json_error(status: StatusCode, message: impl Into<Value>) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "statusCode": status.as_u16(),
            "error": status.canonical_reason().unwrap_or("Error"),
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::NotificationEntry;

    async fn body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_errors_are_422_with_message_list() {
        let err = DomainError::EntityValidation(vec![NotificationEntry::field(
            "name",
            vec!["name should not be empty".to_string()],
        )]);
        let response = domain_error_to_response(err);
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body(response).await,
            json!({
                "statusCode": 422,
                "error": "Unprocessable Entity",
                "message": ["name should not be empty"],
            })
        );
    }

    #[tokio::test]
    async fn not_found_and_storage_errors() {
        let response = domain_error_to_response(DomainError::not_found("Category", "abc"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body(response).await["message"], "Category with id abc not found");

        let response =
            application_error_to_response(ApplicationError::Storage("connection reset".into()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body(response).await["message"], "Internal server error");
    }
}
