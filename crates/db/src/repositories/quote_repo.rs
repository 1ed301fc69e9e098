//! Repository for the `quotes` and `quote_items` tables.

use sitedesk_core::quote::QuoteStatus;
use sitedesk_core::search::SUMMARY_LIST_LIMIT;
use sitedesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::quote::{QuoteHeader, QuoteItemRow, QuoteSummary, QuoteWrite};

/// Header columns joined with the client display name. The COALESCE keeps
/// the editor usable when the referenced client row has gone missing.
const HEADER_COLUMNS: &str = "q.id, q.client_id, \
    COALESCE(c.name, 'Client #' || q.client_id) AS client_name, \
    q.status, q.title, q.notes, q.created_at, q.updated_at";

/// Column list for the `quote_items` table.
const ITEM_COLUMNS: &str = "id, quote_id, item_id, description, quantity, rate, line_total";

/// Provides reads and the transactional save for quotes.
pub struct QuoteRepo;

impl QuoteRepo {
    /// Fetch one quote header with its client display name.
    pub async fn find_header(pool: &PgPool, id: DbId) -> Result<Option<QuoteHeader>, sqlx::Error> {
        let query = format!(
            "SELECT {HEADER_COLUMNS} FROM quotes q \
             LEFT JOIN clients c ON c.id = q.client_id \
             WHERE q.id = $1"
        );
        sqlx::query_as::<_, QuoteHeader>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch a quote's stored lines in insertion order.
    pub async fn list_items(pool: &PgPool, quote_id: DbId) -> Result<Vec<QuoteItemRow>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM quote_items WHERE quote_id = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, QuoteItemRow>(&query)
            .bind(quote_id)
            .fetch_all(pool)
            .await
    }

    /// List recent quotes with client names and summed line totals.
    ///
    /// Without a filter, converted quotes are excluded (they live on as
    /// invoices). With one, only quotes in that status are returned.
    /// Capped at [`SUMMARY_LIST_LIMIT`] rows, most recent first.
    pub async fn list_summaries(
        pool: &PgPool,
        status: Option<QuoteStatus>,
    ) -> Result<Vec<QuoteSummary>, sqlx::Error> {
        const SELECT: &str = "SELECT q.id, q.client_id, \
            COALESCE(c.name, 'Client #' || q.client_id) AS client_name, \
            q.status, q.title, q.created_at, \
            COALESCE(SUM(qi.line_total), 0) AS total \
         FROM quotes q \
         LEFT JOIN clients c ON c.id = q.client_id \
         LEFT JOIN quote_items qi ON qi.quote_id = q.id";
        const TAIL: &str = "GROUP BY q.id, c.name ORDER BY q.created_at DESC";

        match status {
            Some(status) => {
                let query = format!("{SELECT} WHERE q.status = $1 {TAIL} LIMIT $2");
                sqlx::query_as::<_, QuoteSummary>(&query)
                    .bind(status.as_str())
                    .bind(SUMMARY_LIST_LIMIT)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!("{SELECT} WHERE q.status <> 'converted' {TAIL} LIMIT $1");
                sqlx::query_as::<_, QuoteSummary>(&query)
                    .bind(SUMMARY_LIST_LIMIT)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Create or update a quote with a full replacement set of lines.
    ///
    /// Runs in one transaction: for an update, the header is rewritten and
    /// every existing line is deleted; for a create, the header is inserted
    /// and its generated id captured; then one row per line is inserted.
    /// Any failure rolls the whole write back, so readers never observe a
    /// partial line set.
    ///
    /// Returns the resolved quote id. Updating an id with no matching row
    /// yields `sqlx::Error::RowNotFound`.
    pub async fn save(pool: &PgPool, write: &QuoteWrite) -> Result<DbId, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let quote_id = match write.id {
            Some(id) => {
                let result = sqlx::query(
                    "UPDATE quotes SET \
                        client_id = $2, status = $3, title = $4, notes = $5, \
                        updated_at = NOW() \
                     WHERE id = $1",
                )
                .bind(id)
                .bind(write.client_id)
                .bind(write.status.as_str())
                .bind(&write.title)
                .bind(&write.notes)
                .execute(&mut *tx)
                .await?;
                if result.rows_affected() == 0 {
                    return Err(sqlx::Error::RowNotFound);
                }

                sqlx::query("DELETE FROM quote_items WHERE quote_id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
                id
            }
            None => {
                sqlx::query_scalar::<_, DbId>(
                    "INSERT INTO quotes (client_id, status, title, notes) \
                     VALUES ($1, $2, $3, $4) \
                     RETURNING id",
                )
                .bind(write.client_id)
                .bind(write.status.as_str())
                .bind(&write.title)
                .bind(&write.notes)
                .fetch_one(&mut *tx)
                .await?
            }
        };

        for line in &write.lines {
            sqlx::query(
                "INSERT INTO quote_items \
                    (quote_id, item_id, description, quantity, rate, line_total) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(quote_id)
            .bind(line.item_id)
            .bind(&line.description)
            .bind(line.quantity)
            .bind(line.rate)
            .bind(line.line_total)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(quote_id)
    }
}
