use axum::{
    Json, Router,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use chatboard_types::api::HealthResponse;

use crate::error::ApiError;
use crate::messages;
use crate::state::AppState;

/// Message routes, relative to the API base path.
pub fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/messages", get(messages::list_messages))
        .route("/messages", post(messages::create_message))
        .route("/messages/latest", get(messages::latest_messages))
        .route("/messages/search", get(messages::search_messages))
        .route("/messages/{message_id}", get(messages::get_message))
        .route("/messages/{message_id}", put(messages::update_message))
        .route("/messages/{message_id}", delete(messages::delete_message))
        .method_not_allowed_fallback(method_not_allowed)
}

/// Full application: message routes under `base_path`, `/health` at the root,
/// JSON 404/405 errors for everything else.
pub fn build_router(state: AppState, base_path: &str) -> Router {
    let api = match normalize_base_path(base_path) {
        Some(prefix) => Router::new().nest(&prefix, message_routes()),
        None => message_routes(),
    };

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `"api/v1/"` -> `Some("/api/v1")`; `""` and `"/"` -> `None` (mount at root).
pub fn normalize_base_path(base_path: &str) -> Option<String> {
    let trimmed = base_path.trim().trim_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(format!("/{}", trimmed))
    }
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
