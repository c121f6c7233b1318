use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::{error, warn};

use common::types::ErrorBody;
use service::ServiceError;

/// Handler error; renders as `{"error", "code", "message"}`.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self { Self(ServiceError::Validation(msg.into())) }

    pub fn status(&self) -> StatusCode {
        match self.0 {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self { Self(e) }
}

impl From<MultipartError> for ApiError {
    /// A body that cannot be read as multipart (malformed, truncated or over
    /// the route's body limit) is rejected as a bad upload.
    fn from(e: MultipartError) -> Self {
        let status = e.status();
        Self(ServiceError::Validation(format!("invalid upload ({}): {}", status.as_u16(), e.body_text())))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody::new(self.0.kind(), self.0.code(), self.0.to_string());
        if status.is_server_error() {
            error!(code = body.code, error = %body.message, "request failed");
        } else {
            warn!(code = body.code, error = %body.message, "request rejected");
        }
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
