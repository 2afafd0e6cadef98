pub mod handlers;
pub mod messages;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Standard error response structure.
///
/// Every error leaving the service has this shape:
/// - `error`: machine-readable identifier (e.g. `"Forbidden"`)
/// - `message`: human-readable message
///
/// # JSON Example
///
/// ```json
/// {
///   "error": "Forbidden",
///   "message": "User not logged in"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable error identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

/// Infrastructure-level error that converts straight into an HTTP response.
///
/// Domain crates keep their own error enums; this one covers what the shared
/// extractors and middleware can fail with.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::JsonExtractorRejection(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::info!("JSON extraction error: {:?}", e);
                ErrorResponse::new("BadRequest", e.body_text())
            }
            AppError::Forbidden(msg) => {
                tracing::debug!("Forbidden: {}", msg);
                ErrorResponse::new("Forbidden", msg)
            }
            AppError::NotFound(msg) => ErrorResponse::new("NotFound", msg),
            AppError::InternalServerError(msg) => {
                // The cause stays in the logs; clients only get the generic text.
                tracing::error!("Internal server error: {}", msg);
                ErrorResponse::new("InternalServerError", messages::INTERNAL_ERROR)
            }
        };

        (status, Json(body)).into_response()
    }
}
