//! Server-side sessions backed by `tower-sessions`.
//!
//! The session is the only place an access token lives: login stores it,
//! the auth gate reads it back on every protected request.

use super::config::SessionConfig;
use serde::{Deserialize, Serialize};
use tower_sessions::cookie::Key;
use tower_sessions::cookie::time::Duration;
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

/// Session key under which the login result is stored.
pub const AUTHORIZATION_KEY: &str = "authorization";

/// Value stored under [`AUTHORIZATION_KEY`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAuthorization {
    pub access_token: String,
}

/// Session layer type produced by [`create_session_layer`].
pub type AuthSessionLayer = SessionManagerLayer<MemoryStore, SignedCookie>;

/// Create the session layer.
///
/// Sessions are kept in process memory and the cookie is HTTP-only, signed
/// with `config.secret`, and expires after `config.max_age_seconds` of
/// inactivity.
///
/// # Errors
/// Returns an error if the secret cannot be used as a signing key.
pub fn create_session_layer(config: &SessionConfig) -> eyre::Result<AuthSessionLayer> {
    let key = Key::try_from(config.secret.as_bytes())
        .map_err(|e| eyre::eyre!("Invalid session secret: {}", e))?;

    let layer = SessionManagerLayer::new(MemoryStore::default())
        .with_http_only(true)
        .with_secure(config.secure)
        .with_expiry(Expiry::OnInactivity(Duration::seconds(
            config.max_age_seconds,
        )))
        .with_signed(key);

    Ok(layer)
}

/// Bind `access_token` to the session, rotating the session id.
pub async fn store_access_token(
    session: &Session,
    access_token: String,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session
        .insert(AUTHORIZATION_KEY, SessionAuthorization { access_token })
        .await
}

/// Read the access token bound to the session, if any.
pub async fn load_access_token(
    session: &Session,
) -> Result<Option<String>, tower_sessions::session::Error> {
    let authorization = session
        .get::<SessionAuthorization>(AUTHORIZATION_KEY)
        .await?;
    Ok(authorization.map(|a| a.access_token))
}
