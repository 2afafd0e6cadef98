use super::config::JwtConfig;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Source of "now" used when stamping `iat`/`exp`.
pub type Clock = fn() -> DateTime<Utc>;

/// Payload embedded in every access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub username: String,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub data: SessionUser, // Login payload
    pub iat: i64,          // Issued at
    pub exp: i64,          // Expiration time
    pub jti: String,       // JWT ID, for correlating log lines
}

/// HS256 token issuer and verifier.
///
/// Tokens are stateless: the only server-side record of a token is the
/// session that carries it.
#[derive(Clone)]
pub struct JwtAuth {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_seconds: i64,
    clock: Clock,
}

impl JwtAuth {
    /// Create a new issuer from configuration.
    ///
    /// # Example
    /// ```ignore
    /// use axum_helpers::{JwtAuth, JwtConfig};
    /// use core_config::FromEnv;
    ///
    /// let jwt_auth = JwtAuth::new(&JwtConfig::from_env()?);
    /// ```
    pub fn new(config: &JwtConfig) -> Self {
        tracing::info!(ttl_seconds = config.ttl_seconds, "JWT auth initialized");
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            ttl_seconds: config.ttl_seconds,
            clock: Utc::now,
        }
    }

    /// Replace the clock used to stamp new tokens.
    ///
    /// Verification always checks expiry against the real time, so a clock set
    /// in the past yields tokens that are already expired.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Sign a token for `user`, valid for the configured lifetime.
    pub fn issue_token(&self, user: SessionUser) -> eyre::Result<String> {
        let now = (self.clock)();
        let claims = JwtClaims {
            data: user,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.ttl_seconds)).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Verify signature and expiry, returning the decoded claims.
    pub fn verify_token(&self, token: &str) -> eyre::Result<JwtClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let token_data = decode::<JwtClaims>(token, &self.decoding_key, &validation)?;
        Ok(token_data.claims)
    }
}
