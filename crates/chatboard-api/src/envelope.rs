use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use chatboard_types::Envelope;

use crate::error::ApiError;

/// Successful response: `status` plus `{"data": ...}`.
///
/// Encoding happens in `into_response`; if the payload cannot be serialized
/// the caller gets a 500 error envelope instead of a truncated body.
#[derive(Debug)]
pub struct ApiResponse<T> {
    status: StatusCode,
    data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        Self { status, data }
    }

    pub fn ok(data: T) -> Self {
        Self::new(StatusCode::OK, data)
    }

    pub fn created(data: T) -> Self {
        Self::new(StatusCode::CREATED, data)
    }

    fn encode(&self) -> Result<Vec<u8>, ApiError> {
        serde_json::to_vec(&Envelope::new(&self.data)).map_err(|e| ApiError::Encode(e.to_string()))
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        match self.encode() {
            Ok(body) => (
                self.status,
                [(header::CONTENT_TYPE, "application/json")],
                body,
            )
                .into_response(),
            Err(err) => err.into_response(),
        }
    }
}
