use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use tracing::error;

use perch_types::api::{CreateMessageRequest, UpdateMessageRequest};
use perch_types::models::Message;

use crate::accounts::AppState;
use crate::error::ApiError;
use crate::validation::validate_message_text;

pub async fn create_message(
    State(state): State<AppState>,
    Json(req): Json<CreateMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let text = validate_message_text(req.message_text.as_deref())?.to_string();
    let posted_by = req.posted_by.ok_or(ApiError::PosterNotFound)?;
    let posted_at = req
        .posted_at
        .unwrap_or_else(|| chrono::Utc::now().timestamp_millis());

    // Run blocking DB work off the async runtime
    let db = state.clone();
    let message = tokio::task::spawn_blocking(move || -> Result<Message, ApiError> {
        // Accounts are never deleted, so the poster cannot vanish between
        // this check and the insert.
        if db.db.get_account_by_id(posted_by)?.is_none() {
            return Err(ApiError::PosterNotFound);
        }
        Ok(db.db.insert_message(&text, posted_by, posted_at)?)
    })
    .await
    .map_err(join_failure)??;

    Ok(Json(message))
}

pub async fn get_all_messages(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let messages = tokio::task::spawn_blocking(move || db.db.get_all_messages())
        .await
        .map_err(join_failure)??;

    Ok(Json(messages))
}

pub async fn get_message_by_id(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> Result<Response, ApiError> {
    let db = state.clone();
    let message = tokio::task::spawn_blocking(move || db.db.get_message_by_id(message_id))
        .await
        .map_err(join_failure)??;

    // Absence is a 200 with an empty body, not a 404.
    Ok(match message {
        Some(message) => Json(message).into_response(),
        None => ().into_response(),
    })
}

pub async fn delete_message_by_id(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> Result<Response, ApiError> {
    let db = state.clone();
    let deleted = tokio::task::spawn_blocking(move || db.db.delete_message_by_id(message_id))
        .await
        .map_err(join_failure)??;

    // The body is the number of rows removed; deleting a missing id is a
    // 200 with an empty body, same shape as the get above.
    Ok(match deleted {
        Some(_) => Json(1).into_response(),
        None => ().into_response(),
    })
}

pub async fn update_message_by_id(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
    Json(req): Json<UpdateMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let text = validate_message_text(req.message_text.as_deref())?.to_string();

    let db = state.clone();
    let changed =
        tokio::task::spawn_blocking(move || db.db.update_message_text(message_id, &text))
            .await
            .map_err(join_failure)??;

    // Unlike get and delete, updating a missing id is an error.
    if changed == 0 {
        return Err(ApiError::MessageNotFound);
    }

    Ok(Json(1))
}

pub async fn get_messages_by_account(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let messages = tokio::task::spawn_blocking(move || db.db.get_messages_by_poster(account_id))
        .await
        .map_err(join_failure)??;

    // Empty list for unknown accounts too; this endpoint never fails.
    Ok(Json(messages))
}

fn join_failure(err: tokio::task::JoinError) -> ApiError {
    error!("spawn_blocking join error: {}", err);
    ApiError::Internal(err.into())
}
