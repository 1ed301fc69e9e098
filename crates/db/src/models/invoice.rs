//! Invoice entity models.
//!
//! Invoices are read models from the API's point of view: they are minted
//! by quote conversion and never edited through these surfaces.

use chrono::NaiveDate;
use serde::Serialize;
use sitedesk_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// An invoice header joined with its client's display name and address
/// parts. The display address is derived in the API layer, so this row is
/// not serialized directly.
#[derive(Debug, Clone, FromRow)]
pub struct InvoiceDetailRow {
    pub id: DbId,
    pub quote_id: Option<DbId>,
    pub client_id: DbId,
    pub client_name: String,
    pub status: String,
    pub issued_date: NaiveDate,
    pub due_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub notes: String,
    pub created_at: Timestamp,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl InvoiceDetailRow {
    /// Display address derived from the non-empty parts.
    pub fn client_address(&self) -> String {
        sitedesk_core::client::full_address(&[
            &self.address_line1,
            &self.address_line2,
            &self.city,
            &self.state,
            &self.zip,
        ])
    }
}

/// One stored invoice line, in insertion order.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InvoiceItemRow {
    pub id: DbId,
    pub invoice_id: DbId,
    pub item_id: Option<DbId>,
    pub description: String,
    pub quantity: f64,
    pub rate: f64,
    pub line_total: f64,
}

/// Summary row for the invoice lister.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InvoiceSummary {
    pub id: DbId,
    pub client_id: DbId,
    pub client_name: String,
    pub status: String,
    pub issued_date: NaiveDate,
    pub created_at: Timestamp,
    pub total: f64,
}

/// Outcome of attempting to convert a quote into an invoice.
#[derive(Debug)]
pub enum ConvertOutcome {
    /// Conversion committed; holds the new invoice id.
    Converted(DbId),
    /// No quote with the given id.
    QuoteNotFound,
    /// The quote's current status does not allow conversion.
    NotConvertible { status: String },
}
