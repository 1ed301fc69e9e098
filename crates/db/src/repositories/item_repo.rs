//! Repository for the `items` catalog table.

use sqlx::PgPool;

use crate::models::item::{CreateItem, Item, ItemSummary};

/// Full column list for the `items` table.
const COLUMNS: &str = "id, name, description, default_rate, created_at";

/// Columns returned by the catalog picker.
const SUMMARY_COLUMNS: &str = "id, name, description, default_rate";

/// Provides read and seed operations for catalog items.
pub struct ItemRepo;

impl ItemRepo {
    /// Search items by name or description, case-insensitive substring
    /// match. With no query (or a blank one), returns the whole catalog
    /// ordered by name.
    pub async fn search(pool: &PgPool, q: Option<&str>) -> Result<Vec<ItemSummary>, sqlx::Error> {
        match q.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => {
                let query = format!(
                    "SELECT {SUMMARY_COLUMNS} FROM items \
                     WHERE name ILIKE $1 OR description ILIKE $1 \
                     ORDER BY name ASC"
                );
                sqlx::query_as::<_, ItemSummary>(&query)
                    .bind(format!("%{q}%"))
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!("SELECT {SUMMARY_COLUMNS} FROM items ORDER BY name ASC");
                sqlx::query_as::<_, ItemSummary>(&query)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Insert a new catalog item, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateItem) -> Result<Item, sqlx::Error> {
        let query = format!(
            "INSERT INTO items (name, description, default_rate) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.default_rate)
            .fetch_one(pool)
            .await
    }
}
