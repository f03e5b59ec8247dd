//! Error responses for the HTTP boundary.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Body of every error response: `{"error": "<message>"}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Errors a request can end with
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed JSON or failed validation; the message is shown as-is
    #[error("{0}")]
    BadRequest(String),

    #[error("Workout not found")]
    NotFound,

    /// Path did not match any route, or the id was not a positive integer
    #[error("Not found")]
    MalformedRoute,

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Body exceeded the request size limit
    #[error("Request body too large")]
    PayloadTooLarge,

    /// The store could not be reached before the request deadline
    #[error("Service unavailable")]
    Unavailable,

    #[error("Internal error")]
    Internal(String),
}

impl ApiError {
    pub fn invalid_json() -> Self {
        ApiError::BadRequest("Invalid JSON".into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound | ApiError::MalformedRoute => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<gym_core::Error> for ApiError {
    fn from(e: gym_core::Error) -> Self {
        match e {
            gym_core::Error::Validation(msg) => ApiError::BadRequest(msg),
            gym_core::Error::NotFound(_) => ApiError::NotFound,
            gym_core::Error::DeadlineExceeded(_) => ApiError::Unavailable,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            tracing::error!(error = %detail, "Request failed");
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
