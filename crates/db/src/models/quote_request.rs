//! Inbound quote-request (lead) model and DTOs.

use serde::{Deserialize, Serialize};
use sitedesk_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `quote_requests` table. Insert-only.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuoteRequest {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub details: String,
    pub submitted_at: Timestamp,
}

/// DTO for the public intake form. All fields default to empty strings:
/// the form is permissive and the lead is captured as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateQuoteRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub details: String,
}
