//! Configuration types for the auth gate.
//!
//! Both structs implement `FromEnv` from `core_config`, like `ServerConfig`.

use core_config::{env_parse_or, env_required, ConfigError, FromEnv};

/// Default lifetime of an access token, in seconds (one hour).
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 3600;

/// Default lifetime of the session cookie, in seconds (3 600 000 ms).
pub const DEFAULT_SESSION_MAX_AGE_SECONDS: i64 = 3600;

/// Minimum JWT secret length, in characters.
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Minimum session secret length, in bytes. Signed cookies need a 64-byte key.
pub const MIN_SESSION_SECRET_LEN: usize = 64;

/// JWT signing configuration.
///
/// Loaded from environment variables:
/// - `JWT_SECRET` (required) - at least 32 characters
/// - `JWT_TTL_SECONDS` (optional, default 3600)
#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// HS256 signing secret
    pub secret: String,
    /// Token lifetime in seconds
    pub ttl_seconds: i64,
}

impl JwtConfig {
    /// Create a config with the default one-hour lifetime.
    ///
    /// # Panics
    /// Panics if the secret is shorter than 32 characters.
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        assert!(
            secret.len() >= MIN_JWT_SECRET_LEN,
            "JWT secret must be at least 32 characters"
        );
        Self {
            secret,
            ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
        }
    }
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;

        if secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigError::ParseError {
                key: "JWT_SECRET".to_string(),
                details: format!(
                    "must be at least 32 characters for security (got {}). Generate one with: generate-secret",
                    secret.len()
                ),
            });
        }

        let ttl_seconds = env_parse_or("JWT_TTL_SECONDS", DEFAULT_TOKEN_TTL_SECONDS)?;
        if ttl_seconds <= 0 {
            return Err(ConfigError::ParseError {
                key: "JWT_TTL_SECONDS".to_string(),
                details: "must be a positive number of seconds".to_string(),
            });
        }

        Ok(Self {
            secret,
            ttl_seconds,
        })
    }
}

/// Session cookie configuration.
///
/// Loaded from environment variables:
/// - `SESSION_SECRET` (required) - at least 64 bytes, signs the session cookie
/// - `SESSION_COOKIE_SECURE` (optional, default `true`)
/// - `SESSION_MAX_AGE_SECONDS` (optional, default 3600)
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub secret: String,
    pub secure: bool,
    pub max_age_seconds: i64,
}

impl SessionConfig {
    /// Create a config with a secure one-hour cookie.
    ///
    /// # Panics
    /// Panics if the secret is shorter than 64 bytes.
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        assert!(
            secret.len() >= MIN_SESSION_SECRET_LEN,
            "Session secret must be at least 64 bytes"
        );
        Self {
            secret,
            secure: true,
            max_age_seconds: DEFAULT_SESSION_MAX_AGE_SECONDS,
        }
    }

    /// Toggle the `Secure` cookie attribute (disable only for local plain-HTTP runs).
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }
}

impl FromEnv for SessionConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("SESSION_SECRET")?;

        if secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(ConfigError::ParseError {
                key: "SESSION_SECRET".to_string(),
                details: format!(
                    "must be at least 64 bytes (got {}). Generate one with: generate-secret",
                    secret.len()
                ),
            });
        }

        let secure = env_parse_or("SESSION_COOKIE_SECURE", true)?;
        let max_age_seconds =
            env_parse_or("SESSION_MAX_AGE_SECONDS", DEFAULT_SESSION_MAX_AGE_SECONDS)?;

        Ok(Self {
            secret,
            secure,
            max_age_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JWT_SECRET: &str = "this-is-a-valid-secret-with-32-chars!";
    const SESSION_SECRET: &str =
        "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    #[test]
    fn test_jwt_config_new_valid() {
        let config = JwtConfig::new(JWT_SECRET);
        assert_eq!(config.secret, JWT_SECRET);
        assert_eq!(config.ttl_seconds, 3600);
    }

    #[test]
    #[should_panic(expected = "JWT secret must be at least 32 characters")]
    fn test_jwt_config_new_too_short() {
        JwtConfig::new("short");
    }

    #[test]
    fn test_jwt_config_from_env_valid() {
        temp_env::with_vars(
            [
                ("JWT_SECRET", Some(JWT_SECRET)),
                ("JWT_TTL_SECONDS", None),
            ],
            || {
                let config = JwtConfig::from_env().unwrap();
                assert_eq!(config.secret, JWT_SECRET);
                assert_eq!(config.ttl_seconds, DEFAULT_TOKEN_TTL_SECONDS);
            },
        );
    }

    #[test]
    fn test_jwt_config_from_env_missing() {
        temp_env::with_var_unset("JWT_SECRET", || {
            let err = JwtConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("JWT_SECRET"));
        });
    }

    #[test]
    fn test_jwt_config_from_env_too_short() {
        temp_env::with_var("JWT_SECRET", Some("short"), || {
            let err = JwtConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("32 characters"));
        });
    }

    #[test]
    fn test_jwt_config_rejects_non_positive_ttl() {
        temp_env::with_vars(
            [
                ("JWT_SECRET", Some(JWT_SECRET)),
                ("JWT_TTL_SECONDS", Some("0")),
            ],
            || {
                let err = JwtConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("JWT_TTL_SECONDS"));
            },
        );
    }

    #[test]
    fn test_session_config_from_env_defaults() {
        temp_env::with_vars(
            [
                ("SESSION_SECRET", Some(SESSION_SECRET)),
                ("SESSION_COOKIE_SECURE", None),
                ("SESSION_MAX_AGE_SECONDS", None),
            ],
            || {
                let config = SessionConfig::from_env().unwrap();
                assert!(config.secure);
                assert_eq!(config.max_age_seconds, 3600);
            },
        );
    }

    #[test]
    fn test_session_config_from_env_insecure_override() {
        temp_env::with_vars(
            [
                ("SESSION_SECRET", Some(SESSION_SECRET)),
                ("SESSION_COOKIE_SECURE", Some("false")),
            ],
            || {
                assert!(!SessionConfig::from_env().unwrap().secure);
            },
        );
    }

    #[test]
    fn test_session_config_from_env_too_short() {
        temp_env::with_var("SESSION_SECRET", Some("not-long-enough"), || {
            let err = SessionConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("SESSION_SECRET"));
        });
    }
}
