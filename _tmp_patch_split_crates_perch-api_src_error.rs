use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use perch_db::DbError;

/// Everything a handler can fail with. Each variant carries the exact
/// plain-text response body; `IntoResponse` supplies the status code.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Username cannot be blank.")]
    BlankUsername,

    #[error("Password must be at least 4 characters long.")]
    PasswordTooShort,

    #[error("Username already exists.")]
    DuplicateUsername,

    #[error("Invalid username or password.")]
    InvalidCredentials,

    #[error("Message text cannot be blank.")]
    BlankMessageText,

    #[error("Message text cannot exceed 255 characters.")]
    MessageTextTooLong,

    #[error("PostedBy (user ID) cannot be null. User does not exist.")]
    PosterNotFound,

    #[error("Message not found.")]
    MessageNotFound,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            // accounts.username carries the schema's only UNIQUE index, so a
            // unique violation can only mean a taken username.
            DbError::Unique(_) => ApiError::DuplicateUsername,
            other => ApiError::Internal(other.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::DuplicateUsername => StatusCode::CONFLICT,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Internal(err) => {
                error!("Internal error: {:#}", err);
                return (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.")
                    .into_response();
            }
            _ => StatusCode::BAD_REQUEST,
        };

        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_maps_to_conflict() {
        let err = ApiError::from(DbError::Unique("accounts.username".into()));
        assert!(matches!(err, ApiError::DuplicateUsername));
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn validation_errors_are_bad_requests() {
        for err in [
            ApiError::BlankUsername,
            ApiError::PasswordTooShort,
            ApiError::BlankMessageText,
            ApiError::MessageTextTooLong,
            ApiError::PosterNotFound,
            ApiError::MessageNotFound,
        ] {
            assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn internal_errors_hide_their_cause() {
        let err = ApiError::Internal(anyhow::anyhow!("connection dropped"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}


