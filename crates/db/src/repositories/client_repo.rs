//! Repository for the `clients` table.

use sqlx::PgPool;

use crate::models::client::{Client, ClientSummary, CreateClient};

/// Full column list for the `clients` table.
const COLUMNS: &str = "id, name, email, phone, address_line1, address_line2, \
                        city, state, zip, created_at";

/// Columns returned by the billing picker.
const SUMMARY_COLUMNS: &str = "id, name, email, phone, city, state";

/// Provides read and seed operations for clients.
pub struct ClientRepo;

impl ClientRepo {
    /// Search clients by name or email, case-insensitive substring match.
    ///
    /// With no query (or a blank one), returns every client ordered by name.
    pub async fn search(pool: &PgPool, q: Option<&str>) -> Result<Vec<ClientSummary>, sqlx::Error> {
        match q.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => {
                let query = format!(
                    "SELECT {SUMMARY_COLUMNS} FROM clients \
                     WHERE name ILIKE $1 OR email ILIKE $1 \
                     ORDER BY name ASC"
                );
                sqlx::query_as::<_, ClientSummary>(&query)
                    .bind(format!("%{q}%"))
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!("SELECT {SUMMARY_COLUMNS} FROM clients ORDER BY name ASC");
                sqlx::query_as::<_, ClientSummary>(&query)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Insert a new client, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateClient) -> Result<Client, sqlx::Error> {
        let query = format!(
            "INSERT INTO clients \
                (name, email, phone, address_line1, address_line2, city, state, zip) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.address_line1)
            .bind(&input.address_line2)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.zip)
            .fetch_one(pool)
            .await
    }
}
