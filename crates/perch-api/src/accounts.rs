use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use tracing::info;

use perch_db::Database;
use perch_types::api::{LoginRequest, RegisterRequest};

use crate::error::ApiError;
use crate::validation::validate_credentials;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (username, password) =
        validate_credentials(req.username.as_deref(), req.password.as_deref())?;

    // No taken-username read here; the unique index on accounts.username
    // surfaces a concurrent duplicate as a conflict.
    let account = state.db.create_account(username, password)?;

    info!("Registered account {} ({})", account.id, account.username);
    Ok(Json(account))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (username, password) =
        validate_credentials(req.username.as_deref(), req.password.as_deref())?;

    let account = state
        .db
        .get_account_by_username(username)?
        .ok_or(ApiError::InvalidCredentials)?;

    // Plain equality: passwords are stored and compared in plaintext.
    if account.password != password {
        return Err(ApiError::InvalidCredentials);
    }

    Ok(Json(account))
}
