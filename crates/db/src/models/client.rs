//! Client entity model and DTOs.

use serde::{Deserialize, Serialize};
use sitedesk_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A full row from the `clients` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Client {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub created_at: Timestamp,
}

impl Client {
    /// Display address derived from the non-empty parts.
    pub fn full_address(&self) -> String {
        sitedesk_core::client::full_address(&[
            &self.address_line1,
            &self.address_line2,
            &self.city,
            &self.state,
            &self.zip,
        ])
    }
}

/// Compact row returned by the billing client picker.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClientSummary {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub state: String,
}

/// DTO for creating a new client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateClient {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
}
