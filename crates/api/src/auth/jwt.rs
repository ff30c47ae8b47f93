//! Access tokens for login sessions.
//!
//! A token is an HS256 JWT minted for exactly one `user_sessions` row: it
//! carries the session id and shares the session's expiry. Logout revokes
//! the row, which the auth extractor checks, so a token dies with its
//! session even while its signature is still valid.

use chrono::Duration;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use newsdesk_core::types::DbId;
use newsdesk_db::models::session::UserSession;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default session lifetime in minutes.
const DEFAULT_SESSION_MINS: i64 = 60;

/// Payload of every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The signed-in user.
    pub sub: DbId,
    /// The session the token was minted for.
    pub sid: DbId,
    /// Role at login (`"admin"` or `"staff"`). Informational; access checks
    /// reload the admin flag.
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

/// Signing secret and session lifetime.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Session (and token) lifetime in minutes.
    pub access_token_expiry_mins: i64,
}

impl JwtConfig {
    /// Load from the environment.
    ///
    /// | Env Var                  | Required | Default |
    /// |--------------------------|----------|---------|
    /// | `JWT_SECRET`             | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS` | no       | `60`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is missing or empty, or the expiry is not a
    /// positive number of minutes.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .map(|v| v.parse().expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64"))
            .unwrap_or(DEFAULT_SESSION_MINS);
        assert!(
            access_token_expiry_mins > 0,
            "JWT_ACCESS_EXPIRY_MINS must be positive"
        );

        Self {
            secret,
            access_token_expiry_mins,
        }
    }

    /// How long a new login session stays valid.
    pub fn session_ttl(&self) -> Duration {
        Duration::minutes(self.access_token_expiry_mins)
    }
}

/// Mint the token for `session`. It expires together with the session row.
pub fn generate_access_token(
    session: &UserSession,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: session.user_id,
        sid: session.id,
        role: role.to_string(),
        exp: session.expires_at.timestamp(),
        iat: session.created_at.timestamp(),
        jti: Uuid::new_v4().to_string(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Check signature and expiry and return the claims.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}
