//! Unified error handling for the API.
//!
//! Every failure leaves the service as `{"detail": "<message>"}` with the
//! status code of its kind. Server-side failures are reported to Sentry and
//! their details kept out of the response.

use axum::{
    Json,
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::JsonRejection,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::{AuthError, ServiceError, UploadError};

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or wrong admin credentials.
    #[error(transparent)]
    Unauthorized(#[from] AuthError),

    /// Resource or settings service failure.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Upload gateway failure.
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// Malformed request body.
    #[error("{0}")]
    Validation(String),

    /// The path exists but not for this method.
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// The request ran past the configured deadline.
    #[error("Request timed out")]
    Timeout,

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        Self::Service(ServiceError::Repository(err))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        Self::Validation(err.body_text())
    }
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Service(ServiceError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Service(ServiceError::InvalidIdentifier { .. } | ServiceError::Validation(_))
            | Self::Upload(
                UploadError::UnsupportedMediaType
                | UploadError::PayloadTooLarge
                | UploadError::OperationFailed { .. },
            )
            | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Timeout => StatusCode::REQUEST_TIMEOUT,
            Self::Service(ServiceError::Repository(_))
            | Self::Upload(UploadError::UpstreamFailure { .. })
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Log server errors with Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "API request error"
            );
        }

        // Don't expose store details to clients
        let detail = match &self {
            Self::Service(ServiceError::Repository(_)) | Self::Internal(_) => {
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };

        let mut response = (status, Json(json!({ "detail": detail }))).into_response();
        if matches!(self, Self::Unauthorized(_)) {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Basic"));
        }
        response
    }
}
