//! Token primitives for staff sessions.
//!
//! Two kinds of token are in play. The short-lived access token is an
//! HS256-signed JWT whose [`Claims`] carry the staff member's id and role;
//! handlers trust it without a database round trip. The long-lived refresh
//! token is an opaque random string: the client keeps the plaintext and the
//! `user_sessions` table keeps only its SHA-256 digest, so a leaked table
//! cannot be replayed.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sitedesk_core::types::DbId;
use uuid::Uuid;

/// Fallback access-token lifetime when `JWT_ACCESS_EXPIRY_MINS` is unset.
const ACCESS_EXPIRY_MINS: i64 = 15;
/// Fallback refresh-token lifetime when `JWT_REFRESH_EXPIRY_DAYS` is unset.
const REFRESH_EXPIRY_DAYS: i64 = 7;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Signing secret and token lifetimes, loaded once at startup.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared HMAC secret. Whoever holds it can mint staff tokens, so it
    /// lives only in the environment.
    pub secret: String,
    pub access_token_expiry_mins: i64,
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// Read the JWT settings from the environment.
    ///
    /// | Env Var                   | Required | Default |
    /// |---------------------------|----------|---------|
    /// | `JWT_SECRET`              | yes      | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS`  | no       | `15`    |
    /// | `JWT_REFRESH_EXPIRY_DAYS` | no       | `7`     |
    ///
    /// # Panics
    ///
    /// Panics when `JWT_SECRET` is absent or empty, or when a lifetime
    /// variable is set to something that is not an integer.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET is required");
        assert!(!secret.is_empty(), "JWT_SECRET is empty");

        Self {
            secret,
            access_token_expiry_mins: env_i64("JWT_ACCESS_EXPIRY_MINS", ACCESS_EXPIRY_MINS),
            refresh_token_expiry_days: env_i64("JWT_REFRESH_EXPIRY_DAYS", REFRESH_EXPIRY_DAYS),
        }
    }

    /// Access-token lifetime in seconds, as reported to clients.
    pub fn access_ttl_secs(&self) -> i64 {
        self.access_token_expiry_mins * 60
    }

    /// Refresh-token lifetime as a chrono duration, for session expiry rows.
    pub fn refresh_ttl(&self) -> chrono::Duration {
        chrono::Duration::days(self.refresh_token_expiry_days)
    }
}

fn env_i64(name: &str, default: i64) -> i64 {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{name} must be an integer")),
        Err(_) => default,
    }
}

// ---------------------------------------------------------------------------
// Access tokens
// ---------------------------------------------------------------------------

/// Payload of an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Internal user id.
    pub sub: DbId,
    /// Role name as stored on the user row.
    pub role: String,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
    /// Issue time, seconds since the Unix epoch.
    pub iat: i64,
    /// Random token id so individual tokens show up distinctly in audit logs.
    pub jti: String,
}

impl Claims {
    /// Build a fresh claim set expiring `ttl_mins` from now.
    fn issue(user_id: DbId, role: &str, ttl_mins: i64) -> Self {
        let iat = chrono::Utc::now().timestamp();
        Self {
            sub: user_id,
            role: role.to_string(),
            exp: iat + ttl_mins * 60,
            iat,
            jti: Uuid::new_v4().to_string(),
        }
    }
}

/// Sign an access token for the given staff user.
pub fn generate_access_token(
    user_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims::issue(user_id, role, config.access_token_expiry_mins);
    let key = EncodingKey::from_secret(config.secret.as_bytes());
    encode(&Header::new(Algorithm::HS256), &claims, &key)
}

/// Check an access token's signature and expiry, returning its [`Claims`].
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(config.secret.as_bytes());
    // Validation::new enables exp checking with the default leeway.
    let data = decode::<Claims>(token, &key, &Validation::new(Algorithm::HS256))?;
    Ok(data.claims)
}

// ---------------------------------------------------------------------------
// Refresh tokens
// ---------------------------------------------------------------------------

/// A freshly minted refresh token.
///
/// `plaintext` goes back to the client; `digest` is what the session row
/// stores. The plaintext is never persisted.
pub struct RefreshToken {
    pub plaintext: String,
    pub digest: String,
}

impl RefreshToken {
    /// Mint a random refresh token together with its storable digest.
    pub fn mint() -> Self {
        let plaintext = Uuid::new_v4().to_string();
        let digest = refresh_token_digest(&plaintext);
        Self { plaintext, digest }
    }
}

/// SHA-256 hex digest of a refresh token, the form sessions are keyed by.
pub fn refresh_token_digest(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    format!("{digest:x}")
}
