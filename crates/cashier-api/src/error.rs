//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use cashier_core::error::{AppError, ErrorKind, INTERNAL_SERVER_ERROR};

use crate::dto::response::MessageResponse;

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP-facing wrapper around [`AppError`].
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Status code and browser-facing message for this error.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        let err = &self.0;
        match err.kind {
            ErrorKind::Authentication => (StatusCode::UNAUTHORIZED, err.message.clone()),
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, err.message.clone()),
            ErrorKind::Upstream(code) => match StatusCode::from_u16(code) {
                Ok(status) if status.is_client_error() || status.is_server_error() => {
                    (status, err.message.clone())
                }
                _ => {
                    tracing::error!(code, error = %err.message, "Backend failed with an invalid status");
                    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR.to_string())
                }
            },
            ErrorKind::ExternalService
            | ErrorKind::Serialization
            | ErrorKind::Configuration
            | ErrorKind::Internal => {
                tracing::error!(
                    kind = %err.kind,
                    error = %err.message,
                    source = ?err.source,
                    "Internal server error"
                );
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(MessageResponse { message })).into_response()
    }
}
