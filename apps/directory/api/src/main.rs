//! Directory API - in-memory user directory behind a session login

use axum_helpers::server::{create_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // A missing .env file is fine; real environment variables still apply.
    dotenv::dotenv().ok();
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let state = AppState::new(config);
    info!(
        users = state.users.list_users().await?.len(),
        "User directory seeded"
    );

    let api_routes = api::routes(&state)?;
    let router = create_router::<openapi::ApiDoc>(api_routes);
    let app = router.merge(health_router(state.config.app));

    info!(
        "Starting {} v{} on port {}",
        state.config.app.name, state.config.app.version, state.config.server.port
    );

    create_app(app, &state.config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Directory API shutdown complete");
    Ok(())
}
