use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::ErrorResponse;
use axum_helpers::errors::messages;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User with the email {0} not found")]
    NotFound(String),

    #[error("No users found with the last name {0}")]
    NoMatches(String),

    #[error("User with the email {0} already exists")]
    DuplicateEmail(String),

    #[error("{0}")]
    Validation(String),

    /// Storage backend failure; the cause is logged, never returned
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    pub fn status(&self) -> StatusCode {
        match self {
            UserError::NotFound(_) | UserError::NoMatches(_) => StatusCode::NOT_FOUND,
            UserError::DuplicateEmail(_) => StatusCode::CONFLICT,
            UserError::Validation(_) => StatusCode::BAD_REQUEST,
            UserError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            UserError::NotFound(_) | UserError::NoMatches(_) => {
                ErrorResponse::new("NotFound", self.to_string())
            }
            UserError::DuplicateEmail(_) => ErrorResponse::new("Conflict", self.to_string()),
            UserError::Validation(msg) => ErrorResponse::new("ValidationError", msg.clone()),
            UserError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ErrorResponse::new("InternalServerError", messages::INTERNAL_ERROR)
            }
        };

        (status, Json(body)).into_response()
    }
}
