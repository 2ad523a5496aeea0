use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use chatboard_types::ErrorEnvelope;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Your name or message are missing.")]
    Validation,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    Decode(String),

    #[error("Failed to encode response: {0}")]
    Encode(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn message_not_found() -> Self {
        Self::NotFound("Message not found".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Decode(_) | ApiError::Encode(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Internal(detail) => {
                error!("Internal error: {}", detail);
                "Internal server error".to_string()
            }
            ApiError::Encode(detail) => {
                error!("Response encoding failed: {}", detail);
                self.to_string()
            }
            _ => self.to_string(),
        };

        (self.status(), Json(ErrorEnvelope { error: message })).into_response()
    }
}
