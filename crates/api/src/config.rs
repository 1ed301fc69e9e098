//! Process configuration, read once at startup.

use std::str::FromStr;

use crate::auth::jwt::JwtConfig;

/// Everything the server needs to bind, time out requests, and sign tokens.
///
/// Populated by [`ServerConfig::from_env`] in `main`; handlers reach it
/// through `AppState`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address. `HOST`, default `0.0.0.0`.
    pub host: String,
    /// Bind port. `PORT`, default `3000`.
    pub port: u16,
    /// Allowed CORS origins from the comma-separated `CORS_ORIGINS`.
    /// An empty list (the default) allows any origin.
    pub cors_origins: Vec<String>,
    /// Per-request timeout in seconds. `REQUEST_TIMEOUT_SECS`, default `30`.
    pub request_timeout_secs: u64,
    /// Token signing and expiry settings.
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Read the full configuration from the environment.
    ///
    /// # Panics
    ///
    /// Unset variables fall back to the defaults above; a variable that is
    /// set but unparseable panics.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: parsed("PORT", 3000),
            cors_origins: split_origins(&std::env::var("CORS_ORIGINS").unwrap_or_default()),
            request_timeout_secs: parsed("REQUEST_TIMEOUT_SECS", 30),
            jwt: JwtConfig::from_env(),
        }
    }
}

/// Parse env var `name` as `T`, falling back to `default` when unset.
fn parsed<T>(name: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(err) => panic!("{name} is invalid: {err}"),
        },
        Err(_) => default,
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
