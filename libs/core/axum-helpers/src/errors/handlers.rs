use axum::response::{IntoResponse, Response};

use super::{messages, AppError};

/// Fallback handler for unmatched routes.
pub async fn not_found() -> Response {
    AppError::NotFound(messages::NOT_FOUND_RESOURCE.to_string()).into_response()
}
