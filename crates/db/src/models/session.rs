//! Refresh-token session rows.

use sitedesk_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// One row of the `user_sessions` table. `refresh_token_hash` is the
/// SHA-256 digest of the opaque token the client holds.
#[derive(Debug, Clone, FromRow)]
pub struct UserSession {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub created_at: Timestamp,
}

/// Insert payload for `SessionRepo::create`.
pub struct CreateSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
