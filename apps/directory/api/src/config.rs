//! Configuration for the Directory API

use axum_helpers::{JwtConfig, SessionConfig};
use core_config::{app_info, server::ServerConfig, AppInfo, FromEnv};

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub jwt: JwtConfig,
    pub session: SessionConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let jwt = JwtConfig::from_env()?;
        let session = SessionConfig::from_env()?;

        if environment.is_production() && !session.secure {
            tracing::warn!("SESSION_COOKIE_SECURE=false in production; cookies will travel over plain HTTP");
        }

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            jwt,
            session,
        })
    }
}
