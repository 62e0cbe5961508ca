//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use reshub_core::error::{AppError, ErrorKind};

use crate::dto::response::{RESERVATION_FAILED, StatusResponse};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Newtype so the foreign `AppError` can implement `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Result alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;

        let status = match err.kind {
            // Business outcomes keep the plain status body.
            ErrorKind::InsufficientResource => {
                return (StatusCode::OK, Json(StatusResponse::new(err.message))).into_response();
            }
            ErrorKind::QueueEnqueue => {
                tracing::warn!(error = %err.message, "Reservation job rejected by the queue");
                return (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(StatusResponse::new(RESERVATION_FAILED)),
                )
                    .into_response();
            }
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::StoreUnavailable => {
                tracing::error!(error = %err, "Counter store unavailable");
                StatusCode::SERVICE_UNAVAILABLE
            }
            ErrorKind::DuplicateProcessor
            | ErrorKind::Configuration
            | ErrorKind::Serialization
            | ErrorKind::Internal => {
                tracing::error!(error = %err, "Internal server error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ApiErrorResponse {
            error: err.kind.to_string(),
            message: err.message,
        };

        (status, Json(body)).into_response()
    }
}
