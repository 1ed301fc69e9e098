//! Catalog item entity model and DTOs.

use serde::{Deserialize, Serialize};
use sitedesk_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A full row from the `items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Item {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub default_rate: f64,
    pub created_at: Timestamp,
}

/// Compact row returned by the catalog picker.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ItemSummary {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub default_rate: f64,
}

/// DTO for creating a new catalog item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateItem {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub default_rate: f64,
}
