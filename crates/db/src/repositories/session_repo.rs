//! Repository for the `user_sessions` table (refresh-token sessions).
//!
//! A session row holds a SHA-256 digest of the refresh token, never the
//! token itself. Rotation revokes the old row and inserts a fresh one.

use sitedesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::session::{CreateSession, UserSession};

/// Column list for the `user_sessions` table.
const SESSION_COLUMNS: &str = "id, user_id, refresh_token_hash, expires_at, is_revoked, created_at";

/// Session issue, lookup, and revocation.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a session row, returning it as stored.
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<UserSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_sessions (user_id, refresh_token_hash, expires_at) \
             VALUES ($1, $2, $3) RETURNING {SESSION_COLUMNS}"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(input.user_id)
            .bind(&input.refresh_token_hash)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Look up the live session for a refresh-token digest. Revoked and
    /// expired rows never match.
    pub async fn find_by_refresh_token_hash(
        pool: &PgPool,
        hash: &str,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!(
            "SELECT {SESSION_COLUMNS} FROM user_sessions \
             WHERE refresh_token_hash = $1 AND is_revoked = false AND expires_at > NOW()"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(hash)
            .fetch_optional(pool)
            .await
    }

    /// Revoke one session. `false` means the row was already revoked or
    /// never existed.
    pub async fn revoke(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions SET is_revoked = true \
             WHERE id = $1 AND is_revoked = false",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Revoke every live session a user holds, returning how many there
    /// were. Logout calls this so no device keeps a working refresh token.
    pub async fn revoke_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions SET is_revoked = true \
             WHERE user_id = $1 AND is_revoked = false",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Drop rows that can never authenticate again (expired or revoked),
    /// returning how many were deleted. Startup runs this as a prune.
    pub async fn cleanup_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM user_sessions \
             WHERE expires_at < NOW() OR is_revoked = true",
        )
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
