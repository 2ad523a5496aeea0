use axum::{
    body::Bytes,
    extract::{
        Path, Query, State,
        rejection::{BytesRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::Deserialize;
use tracing::{debug, info, warn};

use chatboard_types::{CreateMessageRequest, Message, validate};

use crate::envelope::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// How many messages `GET /messages/latest` returns at most.
pub const LATEST_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub text: Option<String>,
}

type MessageBody = Result<Bytes, BytesRejection>;

/// Decode the first JSON value in the body, whatever the Content-Type says.
/// `null` decodes as an empty request; trailing data after the value is ignored.
fn decode_body(body: MessageBody) -> Result<CreateMessageRequest, ApiError> {
    let bytes = body.map_err(|rejection| ApiError::Decode(rejection.body_text()))?;

    let value = serde_json::Deserializer::from_slice(&bytes)
        .into_iter::<Option<CreateMessageRequest>>()
        .next()
        .unwrap_or_else(|| Err(serde::de::Error::custom("EOF while parsing a value")))
        .map_err(|e| ApiError::Decode(e.to_string()))?;

    Ok(value.unwrap_or_default())
}

/// Decode then validate a create/update body. Decode failures are reported
/// before validation failures.
fn accept_body(body: MessageBody) -> Result<CreateMessageRequest, ApiError> {
    let req = decode_body(body).inspect_err(|err| warn!("Rejected message body: {}", err))?;

    if !validate(&req) {
        warn!("Message body missing from/text");
        return Err(ApiError::Validation);
    }

    Ok(req)
}

/// POST /messages
pub async fn create_message(
    State(state): State<AppState>,
    body: MessageBody,
) -> Result<ApiResponse<Message>, ApiError> {
    let req = accept_body(body)?;
    let message = state.store.insert(&req.from, &req.text)?;

    info!("Message {} created by {}", message.id, message.from);
    Ok(ApiResponse::created(message))
}

/// GET /messages
pub async fn list_messages(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Message>>, ApiError> {
    Ok(ApiResponse::ok(state.store.all()?))
}

/// GET /messages/latest — newest first.
pub async fn latest_messages(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Message>>, ApiError> {
    Ok(ApiResponse::ok(state.store.latest(LATEST_LIMIT)?))
}

/// GET /messages/search?text=...
pub async fn search_messages(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<ApiResponse<Vec<Message>>, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let text = query.text.unwrap_or_default();
    if text.is_empty() {
        return Err(ApiError::BadRequest("Please fill the text field".to_string()));
    }

    let matched = state.store.search(&text)?;
    debug!("Search '{}' matched {} messages", text, matched.len());
    if matched.is_empty() {
        return Err(ApiError::NotFound(
            "No messages matched the search text".to_string(),
        ));
    }

    Ok(ApiResponse::ok(matched))
}

/// GET /messages/{id}
pub async fn get_message(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
) -> Result<ApiResponse<Message>, ApiError> {
    state
        .store
        .get(&message_id)?
        .map(ApiResponse::ok)
        .ok_or_else(ApiError::message_not_found)
}

/// PUT /messages/{id}
///
/// The id is looked up before the body is even decoded, so a missing message
/// is a 404 regardless of what was sent.
pub async fn update_message(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
    body: MessageBody,
) -> Result<ApiResponse<Message>, ApiError> {
    if !state.store.contains(&message_id)? {
        warn!("Update of unknown message {}", message_id);
        return Err(ApiError::message_not_found());
    }

    let req = accept_body(body)?;

    // Re-located under the lock; a concurrent delete shows up as not found.
    let message = state
        .store
        .update(&message_id, &req.from, &req.text)?
        .ok_or_else(ApiError::message_not_found)?;

    info!("Message {} updated", message.id);
    Ok(ApiResponse::ok(message))
}

/// DELETE /messages/{id}
pub async fn delete_message(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if !state.store.remove(&message_id)? {
        warn!("Delete of unknown message {}", message_id);
        return Err(ApiError::message_not_found());
    }

    info!("Message {} deleted", message_id);
    Ok(StatusCode::NO_CONTENT)
}
