//! User directory routes

use axum::Router;
use domain_users::{auth_handlers, handlers};

use crate::state::AppState;

/// Create the guarded `/user` router
pub fn router(state: &AppState) -> Router {
    handlers::router(state.users.clone(), state.auth.clone())
}

/// Create the `/login` router
pub fn login_router(state: &AppState) -> Router {
    auth_handlers::router(state.auth.clone())
}
