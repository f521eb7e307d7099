use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    data_access_error::DataAccessError, error_response::ErrorResponse,
    validation_error::ValidationError,
};

const NOT_FOUND_MESSAGE: &str = "Task not found";
const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred";
const INVALID_INPUT_MESSAGE: &str = "Invalid input type.";
const INVALID_JSON_MESSAGE: &str = "Invalid JSON body.";

/// Everything a task handler can fail with, and how it reaches the client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("task not found")]
    NotFound,
    #[error(transparent)]
    Unexpected(#[from] DataAccessError),
}

// Field problems are reported by validation; only whole-body failures land here.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(%rejection, "request body rejected");
        let message = match rejection {
            JsonRejection::JsonDataError(_) => INVALID_INPUT_MESSAGE.to_string(),
            JsonRejection::JsonSyntaxError(_) => INVALID_JSON_MESSAGE.to_string(),
            other => other.body_text(),
        };
        ApiError::Validation(ValidationError::single("_schema", message))
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            ApiError::Validation(errors) => {
                tracing::debug!(%errors, "request rejected");
                ErrorResponse::validation(errors)
            }
            ApiError::NotFound => ErrorResponse::new(NOT_FOUND_MESSAGE),
            ApiError::Unexpected(error) => {
                tracing::error!(%error, "unexpected error while handling request");
                ErrorResponse::new(UNEXPECTED_MESSAGE)
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_of(error: ApiError) -> (StatusCode, ErrorResponse) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_errors_carry_field_details() {
        let (status, body) = body_of(ValidationError::single("title", "too long").into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Validation error");
        assert_eq!(body.details.unwrap()["title"], ["too long"]);
    }

    #[tokio::test]
    async fn not_found_has_no_details() {
        let (status, body) = body_of(ApiError::NotFound).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, ErrorResponse::new(NOT_FOUND_MESSAGE));
    }

    #[tokio::test]
    async fn store_failures_do_not_leak() {
        let error = DataAccessError::CorruptRow {
            id: 5,
            reason: "secret internals".into(),
        };

        let (status, body) = body_of(error.into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, ErrorResponse::new(UNEXPECTED_MESSAGE));
    }
}
