//! HTTP surface for the perch backend: request handlers plus the router
//! that binds them.

pub mod accounts;
pub mod error;
pub mod messages;
pub mod validation;

pub use accounts::{AppState, AppStateInner};
pub use error::ApiError;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

/// Builds the application router. Transport middleware (CORS, request
/// tracing) is layered on by the binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/register", post(accounts::register))
        .route("/login", post(accounts::login))
        .route("/messages", post(messages::create_message))
        .route("/messages", get(messages::get_all_messages))
        .route("/messages/{message_id}", get(messages::get_message_by_id))
        .route("/messages/{message_id}", delete(messages::delete_message_by_id))
        .route("/messages/{message_id}", patch(messages::update_message_by_id))
        .route("/accounts/{account_id}/messages", get(messages::get_messages_by_account))
        .route("/health", get(health))
        .with_state(state)
}

/// GET /health, liveness check.
async fn health() -> &'static str {
    "ok"
}
