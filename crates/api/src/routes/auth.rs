//! Route definitions for the `/auth` session endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth::{login, logout, me, refresh};
use crate::state::AppState;

/// The `/auth` subtree.
///
/// ```text
/// POST /login     public
/// POST /refresh   public (body carries the refresh token)
/// POST /logout    bearer
/// GET  /me        bearer
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/logout", post(logout))
        .route("/me", get(me))
}
