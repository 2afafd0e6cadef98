//! Application state management

use axum_helpers::JwtAuth;
use domain_users::{InMemoryUserRepository, UserService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub auth: JwtAuth,
    pub users: UserService<InMemoryUserRepository>,
}

impl AppState {
    /// State with a freshly seeded directory
    pub fn new(config: crate::config::Config) -> Self {
        let auth = JwtAuth::new(&config.jwt);
        let users = UserService::new(InMemoryUserRepository::seeded());

        Self {
            config,
            auth,
            users,
        }
    }
}
