//! Employee directory model.

use serde::{Deserialize, Serialize};
use sitedesk_core::types::DbId;
use sqlx::FromRow;

/// A directory row from the `employees` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Employee {
    pub id: DbId,
    pub name: String,
    pub role: String,
}

/// DTO for creating a new employee.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEmployee {
    pub name: String,
    #[serde(default)]
    pub role: String,
}
