//! API routes module

pub mod users;

use axum::Router;
use axum_helpers::create_session_layer;

use crate::state::AppState;

/// Create all API routes, wrapped in the session layer
pub fn routes(state: &AppState) -> eyre::Result<Router> {
    let sessions = create_session_layer(&state.config.session)?;

    Ok(Router::new()
        .nest("/user", users::router(state))
        .merge(users::login_router(state))
        .layer(sessions))
}
