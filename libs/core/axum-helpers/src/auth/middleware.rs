use super::jwt::JwtAuth;
use super::session::load_access_token;
use crate::errors::{AppError, messages};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tower_sessions::Session;

/// Session-bound JWT middleware.
///
/// Reads the access token stored in the caller's session by the login
/// handler and verifies it:
/// - no token in the session: `403 User not logged in`
/// - malformed, mis-signed or expired token: `403 User not authenticated`
///
/// On success the decoded [`JwtClaims`](super::jwt::JwtClaims) are inserted
/// into the request extensions, where handlers can take them with
/// `Extension<JwtClaims>`.
///
/// Must run inside the session layer.
///
/// # Example
///
/// ```ignore
/// use axum::Router;
/// use axum_helpers::{JwtAuth, require_session_token};
///
/// let protected = Router::new()
///     .route("/", get(handler))
///     .layer(axum::middleware::from_fn_with_state(auth, require_session_token));
/// ```
pub async fn require_session_token(
    State(auth): State<JwtAuth>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = load_access_token(&session).await.map_err(|e| {
        AppError::InternalServerError(format!("Failed to read session: {}", e))
    })?;

    let Some(token) = token else {
        tracing::debug!(path = %request.uri().path(), "No access token in session");
        return Err(AppError::Forbidden(messages::NOT_LOGGED_IN.to_string()));
    };

    let claims = auth.verify_token(&token).map_err(|e| {
        tracing::debug!("JWT verification failed: {}", e);
        AppError::Forbidden(messages::NOT_AUTHENTICATED.to_string())
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
