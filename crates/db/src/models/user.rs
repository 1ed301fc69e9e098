//! Staff account rows and their API-safe projection.

use serde::{Deserialize, Serialize};
use sitedesk_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// One row of the `users` table.
///
/// Carries the Argon2id `password_hash` and the lockout bookkeeping, so it
/// deliberately does not derive `Serialize`. Anything leaving the API goes
/// through [`UserResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Project away the credential and bookkeeping fields for API output.
    pub fn to_response(&self) -> UserResponse {
        UserResponse {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role.clone(),
        }
    }
}

/// What the API shows about a staff account.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub role: String,
}

/// Insert payload for `UserRepo::create`. The password arrives already
/// hashed.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: String,
}
