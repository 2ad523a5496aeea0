use serde::{Deserialize, Serialize};

// -- Messages --

/// Body accepted by both create and update.
///
/// Absent fields decode as empty strings so that a body like `{"from":"Tom"}`
/// is rejected by [`validate`] rather than by the JSON decoder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateMessageRequest {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub text: String,
}

/// True when both the author and the body are non-empty.
pub fn validate(req: &CreateMessageRequest) -> bool {
    !req.from.is_empty() && !req.text.is_empty()
}

// -- Envelopes --

/// Wrapper for every successful JSON response: `{"data": ...}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Wrapper for every failed JSON response: `{"error": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
}

// -- Health --

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
