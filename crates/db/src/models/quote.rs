//! Quote entity models and DTOs.
//!
//! The editor posts a [`SaveQuote`] body; the handler validates and
//! normalizes it into a [`QuoteWrite`], which is what the repository
//! actually persists. Read models carry the client display name resolved
//! by LEFT JOIN so the UI never has to chase the reference itself.

use serde::{Deserialize, Serialize};
use sitedesk_core::quote::{QuoteLine, QuoteLineEntry, QuoteStatus};
use sitedesk_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A quote header joined with its client's display name.
///
/// `client_name` falls back to `"Client #<id>"` when the referenced client
/// row no longer exists.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuoteHeader {
    pub id: DbId,
    pub client_id: DbId,
    pub client_name: String,
    pub status: String,
    pub title: String,
    pub notes: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One stored line item, in insertion order.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuoteItemRow {
    pub id: DbId,
    pub quote_id: DbId,
    pub item_id: Option<DbId>,
    pub description: String,
    pub quantity: f64,
    pub rate: f64,
    pub line_total: f64,
}

/// Summary row for the quote lister: header fields plus the summed total
/// of its line items (0 when it has none).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuoteSummary {
    pub id: DbId,
    pub client_id: DbId,
    pub client_name: String,
    pub status: String,
    pub title: String,
    pub created_at: Timestamp,
    pub total: f64,
}

/// Raw editor submission for creating or updating a quote.
///
/// Everything is optional at the wire level; the handler decides what is
/// actually required (a positive `client_id`, at least one surviving line).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaveQuote {
    /// 0 or absent means create.
    #[serde(default)]
    pub id: Option<DbId>,
    pub client_id: Option<DbId>,
    pub status: Option<String>,
    pub title: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub items: Vec<QuoteLineEntry>,
}

/// A validated, normalized quote write ready for the repository.
#[derive(Debug, Clone)]
pub struct QuoteWrite {
    /// `Some` for update, `None` for create.
    pub id: Option<DbId>,
    pub client_id: DbId,
    pub status: QuoteStatus,
    pub title: String,
    pub notes: String,
    pub lines: Vec<QuoteLine>,
}
