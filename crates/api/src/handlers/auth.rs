//! Login, token refresh, logout, and the current-user probe.
//!
//! Password checks run against Argon2id hashes; every successful login or
//! refresh opens a fresh session row keyed by the refresh token's digest.
//! Refresh is rotating: presenting a token revokes its session before a new
//! one is opened, so a replayed token dies on arrival.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sitedesk_db::models::session::CreateSession;
use sitedesk_db::models::user::{User, UserResponse};
use sitedesk_db::repositories::{SessionRepo, UserRepo};

use crate::auth::jwt::{generate_access_token, refresh_token_digest, RefreshToken};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;

/// Wrong-password attempts tolerated before the account locks.
const FAILED_ATTEMPT_LIMIT: i32 = 5;

/// How long a lockout lasts, in minutes.
const LOCKOUT_MINS: i64 = 15;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Body of a successful login or refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Seconds until the access token expires.
    pub expires_in: i64,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/login
///
/// Trade email + password for a token pair. Lookup failures and bad
/// passwords answer with the same message so the endpoint does not confirm
/// which emails exist.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

    ensure_usable(&user)?;

    let password_ok = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::internal("Password verification failed", e))?;

    if !password_ok {
        note_failed_attempt(&state, &user).await?;
        return Err(AppError::unauthorized("Invalid email or password"));
    }

    UserRepo::record_successful_login(&state.pool, user.id).await?;

    let response = open_session(&state, &user).await?;
    tracing::info!(user_id = user.id, "staff login");
    Ok(Json(response))
}

/// POST /api/auth/refresh
///
/// Rotate a refresh token: the presented session is revoked and a new token
/// pair is issued against a fresh session.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let digest = refresh_token_digest(&input.refresh_token);

    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &digest)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid or expired refresh token"))?;

    SessionRepo::revoke(&state.pool, session.id).await?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::unauthorized("User no longer exists"))?;

    ensure_usable(&user)?;

    let response = open_session(&state, &user).await?;
    Ok(Json(response))
}

/// POST /api/auth/logout
///
/// Revoke every session the user holds. 204 on success.
pub async fn logout(State(state): State<AppState>, current: CurrentUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, current.id).await?;
    tracing::info!(user_id = current.id, revoked, "staff logout");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/auth/me
///
/// The profile behind the presented access token.
pub async fn me(State(state): State<AppState>, current: CurrentUser) -> AppResult<Json<MeResponse>> {
    let user = UserRepo::find_by_id(&state.pool, current.id)
        .await?
        .ok_or_else(|| AppError::unauthorized("User no longer exists"))?;

    Ok(Json(MeResponse {
        user: user.to_response(),
    }))
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

/// Reject deactivated accounts and accounts inside a lockout window.
///
/// The lockout check runs before password verification, so a locked account
/// answers 403 even to the correct password.
fn ensure_usable(user: &User) -> AppResult<()> {
    if !user.is_active {
        return Err(AppError::forbidden("Account is deactivated"));
    }
    if let Some(locked_until) = user.locked_until {
        if locked_until > Utc::now() {
            return Err(AppError::forbidden(
                "Account is temporarily locked. Try again later.",
            ));
        }
    }
    Ok(())
}

/// Bump the failed-attempt counter, locking the account at the limit.
async fn note_failed_attempt(state: &AppState, user: &User) -> AppResult<()> {
    UserRepo::increment_failed_login(&state.pool, user.id).await?;

    if user.failed_login_count + 1 >= FAILED_ATTEMPT_LIMIT {
        let until = Utc::now() + chrono::Duration::minutes(LOCKOUT_MINS);
        UserRepo::lock_account(&state.pool, user.id, until).await?;
        tracing::warn!(user_id = user.id, "account locked after failed logins");
    }
    Ok(())
}

/// Mint a token pair, persist the refresh side as a session, and assemble
/// the response body.
async fn open_session(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::internal("Token generation failed", e))?;

    let refresh = RefreshToken::mint();

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: refresh.digest,
            expires_at: Utc::now() + state.config.jwt.refresh_ttl(),
        },
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh.plaintext,
        expires_in: state.config.jwt.access_ttl_secs(),
        user: user.to_response(),
    })
}
