//! Repository for the `invoices` and `invoice_items` tables, including
//! quote conversion.

use chrono::Utc;
use sitedesk_core::invoice::{due_date_from, InvoiceStatus};
use sitedesk_core::quote::QuoteStatus;
use sitedesk_core::search::SUMMARY_LIST_LIMIT;
use sitedesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::invoice::{ConvertOutcome, InvoiceDetailRow, InvoiceItemRow, InvoiceSummary};

/// Invoice header joined with client display fields. Address parts come
/// back as empty strings when the client row is missing so the derived
/// display address simply renders blank.
const DETAIL_COLUMNS: &str = "i.id, i.quote_id, i.client_id, \
    COALESCE(c.name, 'Client #' || i.client_id) AS client_name, \
    i.status, i.issued_date, i.due_date, i.paid_date, i.notes, i.created_at, \
    COALESCE(c.address_line1, '') AS address_line1, \
    COALESCE(c.address_line2, '') AS address_line2, \
    COALESCE(c.city, '') AS city, \
    COALESCE(c.state, '') AS state, \
    COALESCE(c.zip, '') AS zip";

/// Column list for the `invoice_items` table.
const ITEM_COLUMNS: &str = "id, invoice_id, item_id, description, quantity, rate, line_total";

/// Provides invoice reads and the quote-to-invoice conversion.
pub struct InvoiceRepo;

impl InvoiceRepo {
    /// Fetch one invoice header with client display fields.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<InvoiceDetailRow>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} FROM invoices i \
             LEFT JOIN clients c ON c.id = i.client_id \
             WHERE i.id = $1"
        );
        sqlx::query_as::<_, InvoiceDetailRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch an invoice's stored lines in insertion order.
    pub async fn list_items(
        pool: &PgPool,
        invoice_id: DbId,
    ) -> Result<Vec<InvoiceItemRow>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM invoice_items WHERE invoice_id = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, InvoiceItemRow>(&query)
            .bind(invoice_id)
            .fetch_all(pool)
            .await
    }

    /// List recent invoices with client names and summed line totals,
    /// capped at [`SUMMARY_LIST_LIMIT`] rows, most recent first.
    pub async fn list_summaries(pool: &PgPool) -> Result<Vec<InvoiceSummary>, sqlx::Error> {
        let query = "SELECT i.id, i.client_id, \
                COALESCE(c.name, 'Client #' || i.client_id) AS client_name, \
                i.status, i.issued_date, i.created_at, \
                COALESCE(SUM(ii.line_total), 0) AS total \
             FROM invoices i \
             LEFT JOIN clients c ON c.id = i.client_id \
             LEFT JOIN invoice_items ii ON ii.invoice_id = i.id \
             GROUP BY i.id, c.name \
             ORDER BY i.created_at DESC \
             LIMIT $1";
        sqlx::query_as::<_, InvoiceSummary>(query)
            .bind(SUMMARY_LIST_LIMIT)
            .fetch_all(pool)
            .await
    }

    /// Convert a quote into a new unpaid invoice.
    ///
    /// Runs in one transaction with the quote header row locked: the
    /// invoice header is created (client and notes copied from the quote,
    /// net-30 due date), every quote line is copied verbatim as an invoice
    /// line, and the quote is flipped to `converted`. The lock makes a
    /// concurrent double-conversion impossible; terminal quotes are
    /// refused without writing anything.
    pub async fn convert_from_quote(
        pool: &PgPool,
        quote_id: DbId,
    ) -> Result<ConvertOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let quote = sqlx::query_as::<_, (DbId, String, String)>(
            "SELECT client_id, status, notes FROM quotes WHERE id = $1 FOR UPDATE",
        )
        .bind(quote_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((client_id, status, notes)) = quote else {
            return Ok(ConvertOutcome::QuoteNotFound);
        };

        let convertible = QuoteStatus::from_str(&status)
            .is_some_and(|s| s.can_transition_to(QuoteStatus::Converted));
        if !convertible {
            return Ok(ConvertOutcome::NotConvertible { status });
        }

        let issued_date = Utc::now().date_naive();
        let due_date = due_date_from(issued_date);

        let invoice_id = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO invoices (quote_id, client_id, status, issued_date, due_date, notes) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id",
        )
        .bind(quote_id)
        .bind(client_id)
        .bind(InvoiceStatus::Unpaid.as_str())
        .bind(issued_date)
        .bind(due_date)
        .bind(&notes)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO invoice_items \
                (invoice_id, item_id, description, quantity, rate, line_total) \
             SELECT $1, item_id, description, quantity, rate, line_total \
             FROM quote_items WHERE quote_id = $2 \
             ORDER BY id ASC",
        )
        .bind(invoice_id)
        .bind(quote_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE quotes SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(quote_id)
            .bind(QuoteStatus::Converted.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(ConvertOutcome::Converted(invoice_id))
    }
}
