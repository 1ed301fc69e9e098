//! Repository for the `quote_requests` table.

use sqlx::PgPool;

use crate::models::quote_request::{CreateQuoteRequest, QuoteRequest};

/// Column list for the `quote_requests` table.
const COLUMNS: &str = "id, name, email, phone, service, details, submitted_at";

/// Search predicate shared by `count` and `page` so the two queries can
/// never disagree about which rows match.
const SEARCH_WHERE: &str = "name ILIKE $1 OR email ILIKE $1 OR phone ILIKE $1 \
    OR service ILIKE $1 OR details ILIKE $1";

/// Provides insert-only writes and paginated reads for inbound leads.
pub struct QuoteRequestRepo;

impl QuoteRequestRepo {
    /// Insert a new quote request, returning the created row.
    pub async fn insert(
        pool: &PgPool,
        input: &CreateQuoteRequest,
    ) -> Result<QuoteRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO quote_requests (name, email, phone, service, details) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QuoteRequest>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.service)
            .bind(&input.details)
            .fetch_one(pool)
            .await
    }

    /// Count rows matching an optional free-text search.
    pub async fn count(pool: &PgPool, q: Option<&str>) -> Result<i64, sqlx::Error> {
        match q.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => {
                let query = format!("SELECT COUNT(*) FROM quote_requests WHERE {SEARCH_WHERE}");
                sqlx::query_scalar::<_, i64>(&query)
                    .bind(format!("%{q}%"))
                    .fetch_one(pool)
                    .await
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM quote_requests")
                    .fetch_one(pool)
                    .await
            }
        }
    }

    /// Fetch one page of rows, most recent first, matching an optional
    /// free-text search across name/email/phone/service/details.
    pub async fn page(
        pool: &PgPool,
        q: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<QuoteRequest>, sqlx::Error> {
        match q.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM quote_requests \
                     WHERE {SEARCH_WHERE} \
                     ORDER BY submitted_at DESC \
                     LIMIT $2 OFFSET $3"
                );
                sqlx::query_as::<_, QuoteRequest>(&query)
                    .bind(format!("%{q}%"))
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM quote_requests \
                     ORDER BY submitted_at DESC \
                     LIMIT $1 OFFSET $2"
                );
                sqlx::query_as::<_, QuoteRequest>(&query)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
        }
    }
}
