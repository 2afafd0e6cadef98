//! Authentication module.
//!
//! This module provides:
//! - HS256 token issuing and verification ([`JwtAuth`])
//! - The in-memory, signed-cookie session layer that carries tokens
//! - The middleware guarding protected routes
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, SessionConfig, create_session_layer, require_session_token};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//! let sessions = create_session_layer(&SessionConfig::from_env()?)?;
//!
//! let app = Router::new()
//!     .nest("/user", protected.layer(axum::middleware::from_fn_with_state(auth, require_session_token)))
//!     .layer(sessions);
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;
pub mod session;

pub use config::{JwtConfig, SessionConfig};
pub use jwt::{Clock, JwtAuth, JwtClaims, SessionUser};
pub use middleware::require_session_token;
pub use session::{
    AUTHORIZATION_KEY, AuthSessionLayer, SessionAuthorization, create_session_layer,
    load_access_token, store_access_token,
};
