//! API error type shared by every route group.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use crate::application::CheckHistoryError;
use crate::ports::HistoryError;

use super::dto::ErrorResponse;

/// HTTP-facing error that implements IntoResponse.
#[derive(Debug)]
pub enum ApiError {
    /// Request body was not valid JSON for the expected shape.
    MalformedBody(String),
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::MalformedBody(details) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::bad_request("Invalid JSON format").with_details(details),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg)),
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal(msg))
            }
        };
        (status, Json(error)).into_response()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::MalformedBody(error.to_string())
    }
}

impl From<HistoryError> for ApiError {
    fn from(error: HistoryError) -> Self {
        match error {
            HistoryError::InvalidRecord(msg) => ApiError::BadRequest(msg),
            HistoryError::Database(msg) => {
                tracing::error!(error = %msg, "History storage failed");
                ApiError::Internal("Failed to access history".to_string())
            }
        }
    }
}

impl From<CheckHistoryError> for ApiError {
    fn from(error: CheckHistoryError) -> Self {
        match error {
            CheckHistoryError::Validation(e) => ApiError::BadRequest(e.to_string()),
            CheckHistoryError::Storage(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ValidationError;

    #[test]
    fn malformed_body_is_bad_request() {
        let error: ApiError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn database_failure_is_internal() {
        let error: ApiError = HistoryError::Database("timeout".to_string()).into();
        assert_eq!(error.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_failure_is_bad_request() {
        let error: ApiError =
            CheckHistoryError::Validation(ValidationError::empty_field("date")).into();
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
